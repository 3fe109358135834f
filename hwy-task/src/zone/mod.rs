#[cfg(test)]
mod tests;

use std::f32::consts::FRAC_PI_2;

use bevy_math::Vec2;

use crate::signal::TaskSignal;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerTag {
    ColorA,
    ColorB,
    ColorC,
    ColorD,
    ColorE,
    ColorF,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    FirstSignal,
    SecondSignal,
    Goal,
}

/// A visually marked band of the corridor, as fractions of its total length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub start: f32,
    pub end: f32,
    pub tag: MarkerTag,
}

/// A wall panel marking one side of a zone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Marker {
    pub kind: ZoneKind,
    pub tag: MarkerTag,
    pub center: Vec2,
    pub heading: f32,
    pub elevation: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

pub const UNREWARDED_TAGS: [MarkerTag; 2] = [MarkerTag::ColorA, MarkerTag::ColorB];
pub const REWARDED_TAGS: [MarkerTag; 2] = [MarkerTag::ColorC, MarkerTag::ColorD];
pub const AMBIGUOUS_TAG: MarkerTag = MarkerTag::ColorE;
pub const GOAL_ZONE_TAG: MarkerTag = MarkerTag::ColorF;

const BANDS: [(ZoneKind, f32, f32); 3] = [
    (ZoneKind::FirstSignal, 0.2, 0.375),
    (ZoneKind::SecondSignal, 0.55, 0.725),
    (ZoneKind::Goal, 0.875, 0.925),
];

impl Marker {
    pub const ELEVATION: f32 = 1.5;
    pub const HEIGHT: f32 = 3.0;
    pub const DEPTH: f32 = 0.01;
}

impl MarkerTag {
    pub fn texture(&self) -> &'static str {
        match self {
            MarkerTag::ColorA => "colorA",
            MarkerTag::ColorB => "colorB",
            MarkerTag::ColorC => "colorC",
            MarkerTag::ColorD => "colorD",
            MarkerTag::ColorE => "colorE",
            MarkerTag::ColorF => "colorF",
        }
    }
}

impl Zone {
    pub fn span(&self) -> f32 {
        self.end - self.start
    }
}

pub fn zones(signal: TaskSignal) -> [Zone; 3] {
    BANDS.map(|(kind, start, end)| Zone {
        kind,
        start,
        end,
        tag: zone_tag(kind, signal),
    })
}

/// The ambiguous tag replaces only the first zone; payout still follows `is_rewarded`.
pub fn zone_tag(kind: ZoneKind, signal: TaskSignal) -> MarkerTag {
    let pool = if signal.is_rewarded {
        REWARDED_TAGS
    } else {
        UNREWARDED_TAGS
    };

    match kind {
        ZoneKind::FirstSignal if signal.is_ambiguous => AMBIGUOUS_TAG,
        ZoneKind::FirstSignal => pool[0],
        ZoneKind::SecondSignal => pool[1],
        ZoneKind::Goal => GOAL_ZONE_TAG,
    }
}

/// Mirrored marker pairs on the walls at `z = +-half_width`, each facing into the corridor.
pub fn markers(total_length: f32, half_width: f32, signal: TaskSignal) -> Vec<Marker> {
    zones(signal)
        .into_iter()
        .flat_map(|zone| {
            let width = zone.span() * total_length;
            let x = zone.start * total_length + width / 2.0;

            [(half_width, FRAC_PI_2), (-half_width, -FRAC_PI_2)].map(|(z, heading)| Marker {
                kind: zone.kind,
                tag: zone.tag,
                center: Vec2::new(x, z),
                heading,
                elevation: Marker::ELEVATION,
                width,
                height: Marker::HEIGHT,
                depth: Marker::DEPTH,
            })
        })
        .collect()
}
