//! Material color roles for light and dark themes.

use crate::argb::Argb;
use crate::palette::{CorePalette, TonalPalette};

/// The 27 Material color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Scheme {
    pub primary: Argb,
    pub on_primary: Argb,
    pub primary_container: Argb,
    pub on_primary_container: Argb,
    pub secondary: Argb,
    pub on_secondary: Argb,
    pub secondary_container: Argb,
    pub on_secondary_container: Argb,
    pub tertiary: Argb,
    pub on_tertiary: Argb,
    pub tertiary_container: Argb,
    pub on_tertiary_container: Argb,
    pub error: Argb,
    pub on_error: Argb,
    pub error_container: Argb,
    pub on_error_container: Argb,
    pub background: Argb,
    pub on_background: Argb,
    pub surface: Argb,
    pub on_surface: Argb,
    pub surface_variant: Argb,
    pub on_surface_variant: Argb,
    pub outline: Argb,
    pub shadow: Argb,
    pub inverse_surface: Argb,
    pub inverse_on_surface: Argb,
    pub inverse_primary: Argb,
}

/// Tones for one accent family: role, on-role, container, on-container.
type AccentTones = [f64; 4];

struct RoleTones {
    accent: AccentTones,
    error: AccentTones,
    background: f64,
    on_background: f64,
    surface_variant: f64,
    on_surface_variant: f64,
    outline: f64,
    inverse_surface: f64,
    inverse_on_surface: f64,
    inverse_primary: f64,
}

const LIGHT: RoleTones = RoleTones {
    accent: [40.0, 100.0, 90.0, 10.0],
    error: [40.0, 100.0, 90.0, 10.0],
    background: 99.0,
    on_background: 10.0,
    surface_variant: 90.0,
    on_surface_variant: 30.0,
    outline: 50.0,
    inverse_surface: 20.0,
    inverse_on_surface: 95.0,
    inverse_primary: 80.0,
};

// on_error_container sits at 80, the same tone as error.
const DARK: RoleTones = RoleTones {
    accent: [80.0, 20.0, 30.0, 90.0],
    error: [80.0, 20.0, 30.0, 80.0],
    background: 10.0,
    on_background: 90.0,
    surface_variant: 30.0,
    on_surface_variant: 80.0,
    outline: 60.0,
    inverse_surface: 90.0,
    inverse_on_surface: 20.0,
    inverse_primary: 40.0,
};

impl Scheme {
    pub fn light(argb: Argb) -> Self {
        Self::light_from_core(&CorePalette::of(argb))
    }

    pub fn dark(argb: Argb) -> Self {
        Self::dark_from_core(&CorePalette::of(argb))
    }

    pub fn light_from_core(core: &CorePalette) -> Self {
        Self::from_tones(core, &LIGHT)
    }

    pub fn dark_from_core(core: &CorePalette) -> Self {
        Self::from_tones(core, &DARK)
    }

    fn from_tones(core: &CorePalette, tones: &RoleTones) -> Self {
        let accent = |palette: &TonalPalette, t: AccentTones| t.map(|tone| palette.tone(tone));
        let [primary, on_primary, primary_container, on_primary_container] =
            accent(&core.a1, tones.accent);
        let [secondary, on_secondary, secondary_container, on_secondary_container] =
            accent(&core.a2, tones.accent);
        let [tertiary, on_tertiary, tertiary_container, on_tertiary_container] =
            accent(&core.a3, tones.accent);
        let [error, on_error, error_container, on_error_container] =
            accent(&core.error, tones.error);

        Self {
            primary,
            on_primary,
            primary_container,
            on_primary_container,
            secondary,
            on_secondary,
            secondary_container,
            on_secondary_container,
            tertiary,
            on_tertiary,
            tertiary_container,
            on_tertiary_container,
            error,
            on_error,
            error_container,
            on_error_container,
            background: core.n1.tone(tones.background),
            on_background: core.n1.tone(tones.on_background),
            surface: core.n1.tone(tones.background),
            on_surface: core.n1.tone(tones.on_background),
            surface_variant: core.n2.tone(tones.surface_variant),
            on_surface_variant: core.n2.tone(tones.on_surface_variant),
            outline: core.n2.tone(tones.outline),
            shadow: core.n1.tone(0.0),
            inverse_surface: core.n1.tone(tones.inverse_surface),
            inverse_on_surface: core.n1.tone(tones.inverse_on_surface),
            inverse_primary: core.a1.tone(tones.inverse_primary),
        }
    }

    /// `(role name, color)` for every role, in declaration order.
    pub fn roles(&self) -> [(&'static str, Argb); 27] {
        [
            ("primary", self.primary),
            ("onPrimary", self.on_primary),
            ("primaryContainer", self.primary_container),
            ("onPrimaryContainer", self.on_primary_container),
            ("secondary", self.secondary),
            ("onSecondary", self.on_secondary),
            ("secondaryContainer", self.secondary_container),
            ("onSecondaryContainer", self.on_secondary_container),
            ("tertiary", self.tertiary),
            ("onTertiary", self.on_tertiary),
            ("tertiaryContainer", self.tertiary_container),
            ("onTertiaryContainer", self.on_tertiary_container),
            ("error", self.error),
            ("onError", self.on_error),
            ("errorContainer", self.error_container),
            ("onErrorContainer", self.on_error_container),
            ("background", self.background),
            ("onBackground", self.on_background),
            ("surface", self.surface),
            ("onSurface", self.on_surface),
            ("surfaceVariant", self.surface_variant),
            ("onSurfaceVariant", self.on_surface_variant),
            ("outline", self.outline),
            ("shadow", self.shadow),
            ("inverseSurface", self.inverse_surface),
            ("inverseOnSurface", self.inverse_on_surface),
            ("inversePrimary", self.inverse_primary),
        ]
    }
}
