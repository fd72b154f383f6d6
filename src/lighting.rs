//! Light switches and the light sources they produce each frame.

use glam::{Vec3, Vec4};

/// Number of switchable lights in the stadium
pub const LIGHT_COUNT: usize = 3;

const NO_LIGHT: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
const LIGHT_AMBIENT: Vec4 = Vec4::new(0.25, 0.25, 0.25, 1.0);
const LIGHT_DIFFUSE: Vec4 = Vec4::new(0.75, 0.75, 0.75, 1.0);
const LIGHT_SPECULAR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// Where each light sits, and whether it is a downward spot
const PLACEMENTS: [(Vec3, bool); LIGHT_COUNT] = [
    (Vec3::new(0.0, 0.0, -50.0), false),
    (Vec3::new(10.0, 0.0, 0.0), false),
    (Vec3::new(0.0, 50.0, 0.0), true),
];

const SPOT_DIRECTION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const SPOT_CUTOFF: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    pub direction: Vec3,
    /// Half-angle of the cone in degrees. Only 0..=90 restricts the light.
    pub cutoff: f32,
}

/// Fixed-function light unit parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// Homogeneous position; `w == 0` makes the light directional
    pub position: Vec4,
    pub spot: Option<Spot>,
}

impl LightSource {
    /// A light that contributes nothing
    pub fn off() -> Self {
        LightSource {
            ambient: NO_LIGHT,
            diffuse: NO_LIGHT,
            specular: NO_LIGHT,
            position: NO_LIGHT,
            spot: None,
        }
    }
}

/// Per-light switches plus the global ambient/diffuse/specular components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightToggles {
    pub ambient: bool,
    pub diffuse: bool,
    pub specular: bool,
    pub enabled: [bool; LIGHT_COUNT],
}

impl Default for LightToggles {
    fn default() -> Self {
        LightToggles {
            ambient: true,
            diffuse: true,
            specular: true,
            enabled: [true, true, false],
        }
    }
}

impl LightToggles {
    /// Flips light `index`; returns the new state, or `None` for an unknown light.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.enabled.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Light unit parameters for every light, in unit order.
    pub fn sources(&self) -> [LightSource; LIGHT_COUNT] {
        std::array::from_fn(|index| {
            let (position, spot) = PLACEMENTS[index];
            self.source(self.enabled[index], position, spot)
        })
    }

    fn source(&self, enabled: bool, position: Vec3, spot: bool) -> LightSource {
        let mut light = LightSource::off();
        if enabled {
            if self.ambient {
                light.ambient = LIGHT_AMBIENT;
            }
            if self.diffuse {
                light.diffuse = LIGHT_DIFFUSE;
            }
            if self.specular {
                light.specular = LIGHT_SPECULAR;
            }
            light.position = position.extend(1.0);
        }
        if spot {
            light.spot = Some(Spot {
                direction: SPOT_DIRECTION,
                cutoff: SPOT_CUTOFF,
            });
        }
        light
    }
}
