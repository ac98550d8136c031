use crate::state::AsteroidsGame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    pub const SLATE: Self = Self::rgb(0x8c, 0x8c, 0x9e);
    pub const CYAN: Self = Self::rgb(0x00, 0xc8, 0xc8);
    pub const AMBER: Self = Self::rgb(0xff, 0x96, 0x00);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal draw target the host supplies. The core never assumes more than
/// a color register and filled circles.
pub trait Surface {
    fn set_color(&mut self, color: Color);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64);
}

/// Draw every live object in a stable order: asteroids, then missiles,
/// then the ship on top. The ship adds a nose dot showing its heading.
pub fn render(game: &AsteroidsGame, surface: &mut dyn Surface) {
    for asteroid in game.asteroids() {
        surface.set_color(if asteroid.scenic() {
            Color::CYAN
        } else {
            Color::SLATE
        });
        surface.fill_circle(asteroid.pos.x, asteroid.pos.y, asteroid.radius);
    }

    surface.set_color(Color::RED);
    for missile in game.missiles() {
        surface.fill_circle(missile.pos.x, missile.pos.y, missile.radius);
    }

    let ship = game.ship();
    if ship.alive {
        if ship.thrusting {
            surface.set_color(Color::AMBER);
            let flame = ship.pos - ship.direction() * ship.radius;
            surface.fill_circle(flame.x, flame.y, ship.radius * 0.4);
        }
        surface.set_color(Color::WHITE);
        surface.fill_circle(ship.pos.x, ship.pos.y, ship.radius);
        let nose = ship.pos + ship.direction() * ship.radius;
        surface.fill_circle(nose.x, nose.y, ship.radius * 0.25);
    }
}
