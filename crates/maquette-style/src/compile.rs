#![forbid(unsafe_code)]

//! Property-to-style compilation.
//!
//! [`compile`] maps a widget's property set to a render-ready
//! [`StyleDescriptor`]. It is pure (no tree access, no side effects),
//! total (never fails for any well-typed property list), and idempotent.
//! Unknown property names are ignored for forward compatibility;
//! malformed values (unparsable color, inset, or weight expressions)
//! simply leave the corresponding field absent so render defaults apply
//! downstream.

use maquette_core::geometry::Axis;
use maquette_core::kind::WidgetKind;
use maquette_core::property::{Property, PropertyValue};

use crate::color::Rgba;
use crate::insets::Insets;

/// Scale from logical design units to absolute pixels. Dimension values
/// are authored in logical pixels, so the factor is currently identity;
/// it exists so a device-pixel-ratio pass has a single hook point.
const DIMENSION_SCALE: f64 = 1.0;

/// Horizontal or vertical placement within a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignPoint {
    /// Leading edge.
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
}

/// Main-axis distribution for flex containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MainAxisAlign {
    /// Pack children at the start.
    #[default]
    Start,
    /// Center children.
    Center,
    /// Pack children at the end.
    End,
    /// Equal space between children.
    SpaceBetween,
    /// Equal space around children.
    SpaceAround,
    /// Equal space between and around children.
    SpaceEvenly,
}

/// Cross-axis placement for flex containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossAxisAlign {
    /// Align to the start edge.
    Start,
    /// Center on the cross axis (default).
    #[default]
    Center,
    /// Align to the end edge.
    End,
    /// Stretch to fill the cross axis.
    Stretch,
}

/// Whether a flex container hugs its content or fills its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MainAxisSize {
    /// Shrink to content.
    Min,
    /// Expand to the available extent (default).
    #[default]
    Max,
}

/// Derived flex mapping for `Row`/`Column` containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlexStyle {
    /// Layout direction (static per kind).
    pub direction: Axis,
    /// Main-axis distribution.
    pub main: MainAxisAlign,
    /// Cross-axis placement.
    pub cross: CrossAxisAlign,
    /// Main-axis sizing.
    pub size: MainAxisSize,
}

/// One layer of a composed drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowLayer {
    /// Vertical offset in logical pixels.
    pub y_offset: f64,
    /// Blur radius in logical pixels.
    pub blur: f64,
    /// Layer opacity (0–1).
    pub opacity: f64,
}

/// A layered shadow derived from an `elevation` value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shadow {
    /// The table step the elevation resolved to.
    pub level: u8,
    /// Tight, dark key shadow.
    pub key: ShadowLayer,
    /// Soft, wide ambient shadow.
    pub ambient: ShadowLayer,
}

/// Monotonic elevation step table. An elevation resolves to the largest
/// step not exceeding it; elevations at or below zero produce no shadow.
const ELEVATION_STEPS: &[(u8, Shadow)] = &[
    (1, shadow(1, 1.0, 2.0, 2.0, 1.0)),
    (2, shadow(2, 1.0, 3.0, 3.0, 2.0)),
    (3, shadow(3, 2.0, 4.0, 4.0, 3.0)),
    (4, shadow(4, 2.0, 5.0, 5.0, 4.0)),
    (6, shadow(6, 3.0, 6.0, 7.0, 6.0)),
    (8, shadow(8, 4.0, 8.0, 9.0, 8.0)),
    (12, shadow(12, 6.0, 10.0, 12.0, 11.0)),
    (16, shadow(16, 8.0, 12.0, 15.0, 14.0)),
    (24, shadow(24, 11.0, 15.0, 19.0, 18.0)),
];

const fn shadow(level: u8, key_y: f64, key_blur: f64, ambient_y: f64, ambient_blur: f64) -> Shadow {
    Shadow {
        level,
        key: ShadowLayer {
            y_offset: key_y,
            blur: key_blur,
            opacity: 0.30,
        },
        ambient: ShadowLayer {
            y_offset: ambient_y,
            blur: ambient_blur,
            opacity: 0.15,
        },
    }
}

/// Resolve an elevation through the step table.
#[must_use]
pub fn shadow_for_elevation(elevation: i64) -> Option<Shadow> {
    if elevation <= 0 {
        return None;
    }
    let mut selected = None;
    for (step, shadow) in ELEVATION_STEPS {
        if i64::from(*step) <= elevation {
            selected = Some(*shadow);
        } else {
            break;
        }
    }
    selected
}

/// Map a named (or numeric) font weight to its numeric value.
///
/// The vocabulary is closed; numeric strings pass through when they are
/// multiples of 100 within 100–900.
#[must_use]
pub fn font_weight(name: &str) -> Option<u16> {
    match name.trim() {
        "thin" => Some(100),
        "extraLight" => Some(200),
        "light" => Some(300),
        "normal" | "regular" => Some(400),
        "medium" => Some(500),
        "semiBold" => Some(600),
        "bold" => Some(700),
        "extraBold" => Some(800),
        "black" => Some(900),
        other => match other.parse::<u16>() {
            Ok(n) if (100..=900).contains(&n) && n % 100 == 0 => Some(n),
            _ => None,
        },
    }
}

/// Map a nine-point alignment keyword to a `(horizontal, vertical)` pair.
#[must_use]
pub fn alignment_pair(keyword: &str) -> Option<(AlignPoint, AlignPoint)> {
    use AlignPoint::*;
    match keyword.trim() {
        "topLeft" => Some((Start, Start)),
        "topCenter" => Some((Center, Start)),
        "topRight" => Some((End, Start)),
        "centerLeft" => Some((Start, Center)),
        "center" => Some((Center, Center)),
        "centerRight" => Some((End, Center)),
        "bottomLeft" => Some((Start, End)),
        "bottomCenter" => Some((Center, End)),
        "bottomRight" => Some((End, End)),
        _ => None,
    }
}

fn main_axis_align(keyword: &str) -> Option<MainAxisAlign> {
    match keyword.trim() {
        "start" => Some(MainAxisAlign::Start),
        "center" => Some(MainAxisAlign::Center),
        "end" => Some(MainAxisAlign::End),
        "spaceBetween" => Some(MainAxisAlign::SpaceBetween),
        "spaceAround" => Some(MainAxisAlign::SpaceAround),
        "spaceEvenly" => Some(MainAxisAlign::SpaceEvenly),
        _ => None,
    }
}

fn cross_axis_align(keyword: &str) -> Option<CrossAxisAlign> {
    match keyword.trim() {
        "start" => Some(CrossAxisAlign::Start),
        "center" => Some(CrossAxisAlign::Center),
        "end" => Some(CrossAxisAlign::End),
        "stretch" => Some(CrossAxisAlign::Stretch),
        _ => None,
    }
}

/// Compiled, render-ready visual attributes of one widget.
///
/// Absent fields mean "render default applies"; the compiler never
/// invents values for properties the widget does not carry.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDescriptor {
    /// Absolute width in pixels.
    pub width: Option<f64>,
    /// Absolute height in pixels.
    pub height: Option<f64>,
    /// Fill color.
    pub background: Option<Rgba>,
    /// Foreground/text color.
    pub text_color: Option<Rgba>,
    /// Border stroke color.
    pub border_color: Option<Rgba>,
    /// Border stroke width in pixels.
    pub border_width: Option<f64>,
    /// Corner radius in pixels.
    pub border_radius: Option<f64>,
    /// Font size in pixels.
    pub font_size: Option<f64>,
    /// Numeric font weight (100–900).
    pub font_weight: Option<u16>,
    /// Letter spacing in pixels.
    pub letter_spacing: Option<f64>,
    /// Opacity (0–1).
    pub opacity: Option<f64>,
    /// Inner edge insets.
    pub padding: Option<Insets>,
    /// Outer edge insets.
    pub margin: Option<Insets>,
    /// Layered drop shadow.
    pub shadow: Option<Shadow>,
    /// Box alignment as a `(horizontal, vertical)` pair.
    pub alignment: Option<(AlignPoint, AlignPoint)>,
    /// Flex mapping, present only for `Row`/`Column`.
    pub flex: Option<FlexStyle>,
}

fn dimension(value: &PropertyValue) -> Option<f64> {
    value
        .as_number()
        .filter(|n| n.is_finite())
        .map(|n| n * DIMENSION_SCALE)
}

fn color(value: &PropertyValue) -> Option<Rgba> {
    value.as_color().and_then(Rgba::parse)
}

/// Compile a property set into a style descriptor.
///
/// Pure and total: identical inputs yield identical output, and no
/// well-typed property list makes it fail.
#[must_use]
pub fn compile(properties: &[Property], kind: WidgetKind) -> StyleDescriptor {
    let mut style = StyleDescriptor::default();
    let mut main = None;
    let mut cross = None;
    let mut size = None;

    for prop in properties {
        match prop.name.as_str() {
            "width" => style.width = dimension(&prop.value),
            "height" => style.height = dimension(&prop.value),
            "fontSize" => style.font_size = dimension(&prop.value),
            "borderRadius" => style.border_radius = dimension(&prop.value),
            "borderWidth" => style.border_width = dimension(&prop.value),
            "letterSpacing" => style.letter_spacing = dimension(&prop.value),
            "backgroundColor" => style.background = color(&prop.value),
            "color" | "textColor" => style.text_color = color(&prop.value),
            "borderColor" => style.border_color = color(&prop.value),
            "fontWeight" => {
                style.font_weight = prop.value.as_text().and_then(font_weight);
            }
            "elevation" => {
                style.shadow = prop.value.as_integer().and_then(shadow_for_elevation);
            }
            "alignment" => {
                style.alignment = prop.value.as_alignment().and_then(alignment_pair);
            }
            "padding" => style.padding = prop.value.as_text().and_then(Insets::parse),
            "margin" => style.margin = prop.value.as_text().and_then(Insets::parse),
            "opacity" => {
                style.opacity = prop
                    .value
                    .as_number()
                    .filter(|n| n.is_finite())
                    .map(|n| n.clamp(0.0, 1.0));
            }
            "mainAxisAlignment" => {
                main = prop.value.as_alignment().and_then(main_axis_align);
            }
            "crossAxisAlignment" => {
                cross = prop.value.as_alignment().and_then(cross_axis_align);
            }
            "mainAxisSize" => {
                size = prop.value.as_text().and_then(|s| match s.trim() {
                    "min" => Some(MainAxisSize::Min),
                    "max" => Some(MainAxisSize::Max),
                    _ => None,
                });
            }
            // Unknown names are ignored (forward-compatible).
            _ => {}
        }
    }

    if matches!(kind, WidgetKind::Row | WidgetKind::Column) {
        style.flex = Some(FlexStyle {
            direction: kind.primary_axis(),
            main: main.unwrap_or_default(),
            cross: cross.unwrap_or_default(),
            size: size.unwrap_or_default(),
        });
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_core::id::{PropertyId, WidgetId};
    use proptest::prelude::*;

    fn prop(name: &str, value: PropertyValue) -> Property {
        Property::new(PropertyId::new(0), WidgetId::new(0), name, value)
    }

    #[test]
    fn dimensions_scale_to_pixels() {
        let style = compile(
            &[
                prop("width", PropertyValue::Integer(120)),
                prop("height", PropertyValue::Decimal(44.5)),
            ],
            WidgetKind::Container,
        );
        assert_eq!(style.width, Some(120.0));
        assert_eq!(style.height, Some(44.5));
    }

    #[test]
    fn colors_map_directly() {
        let style = compile(
            &[
                prop("backgroundColor", PropertyValue::Color("#4B39EF".into())),
                prop("textColor", PropertyValue::Color("#FFFFFF".into())),
            ],
            WidgetKind::Button,
        );
        assert_eq!(style.background, Some(Rgba::rgb(0x4B, 0x39, 0xEF)));
        assert_eq!(style.text_color, Some(Rgba::rgb(255, 255, 255)));
    }

    #[test]
    fn named_font_weights() {
        assert_eq!(font_weight("bold"), Some(700));
        assert_eq!(font_weight("semiBold"), Some(600));
        assert_eq!(font_weight("regular"), Some(400));
        assert_eq!(font_weight("450"), None);
        assert_eq!(font_weight("600"), Some(600));
        assert_eq!(font_weight("heavy"), None);
    }

    #[test]
    fn elevation_selects_largest_step_not_exceeding() {
        assert_eq!(shadow_for_elevation(0), None);
        assert_eq!(shadow_for_elevation(-3), None);
        assert_eq!(shadow_for_elevation(1).unwrap().level, 1);
        assert_eq!(shadow_for_elevation(5).unwrap().level, 4);
        assert_eq!(shadow_for_elevation(7).unwrap().level, 6);
        assert_eq!(shadow_for_elevation(24).unwrap().level, 24);
        assert_eq!(shadow_for_elevation(100).unwrap().level, 24);
    }

    #[test]
    fn elevation_table_is_monotonic() {
        let mut last = 0.0;
        for e in 1..=32 {
            let s = shadow_for_elevation(e).unwrap();
            assert!(s.key.blur >= last, "blur not monotonic at elevation {e}");
            last = s.key.blur;
        }
    }

    #[test]
    fn alignment_maps_to_axis_pair() {
        assert_eq!(
            alignment_pair("topLeft"),
            Some((AlignPoint::Start, AlignPoint::Start))
        );
        assert_eq!(
            alignment_pair("bottomRight"),
            Some((AlignPoint::End, AlignPoint::End))
        );
        assert_eq!(
            alignment_pair("center"),
            Some((AlignPoint::Center, AlignPoint::Center))
        );
        assert_eq!(alignment_pair("middle"), None);
    }

    #[test]
    fn insets_grammars_reach_descriptor() {
        let style = compile(
            &[
                prop("padding", PropertyValue::Text("all(8)".into())),
                prop(
                    "margin",
                    PropertyValue::Text("symmetric(horizontal: 16, vertical: 4)".into()),
                ),
            ],
            WidgetKind::Container,
        );
        assert_eq!(style.padding, Some(Insets::all(8.0)));
        assert_eq!(style.margin, Some(Insets::symmetric(16.0, 4.0)));
    }

    #[test]
    fn row_derives_flex() {
        let style = compile(
            &[
                prop(
                    "mainAxisAlignment",
                    PropertyValue::Alignment("spaceBetween".into()),
                ),
                prop(
                    "crossAxisAlignment",
                    PropertyValue::Alignment("stretch".into()),
                ),
                prop("mainAxisSize", PropertyValue::Text("min".into())),
            ],
            WidgetKind::Row,
        );
        let flex = style.flex.expect("rows derive flex");
        assert_eq!(flex.direction, Axis::Horizontal);
        assert_eq!(flex.main, MainAxisAlign::SpaceBetween);
        assert_eq!(flex.cross, CrossAxisAlign::Stretch);
        assert_eq!(flex.size, MainAxisSize::Min);
    }

    #[test]
    fn column_flex_defaults_when_properties_absent() {
        let style = compile(&[], WidgetKind::Column);
        let flex = style.flex.expect("columns derive flex");
        assert_eq!(flex.direction, Axis::Vertical);
        assert_eq!(flex.main, MainAxisAlign::Start);
        assert_eq!(flex.cross, CrossAxisAlign::Center);
        assert_eq!(flex.size, MainAxisSize::Max);
    }

    #[test]
    fn non_flex_kinds_get_no_flex() {
        let style = compile(
            &[prop(
                "mainAxisAlignment",
                PropertyValue::Alignment("center".into()),
            )],
            WidgetKind::Container,
        );
        assert_eq!(style.flex, None);
    }

    #[test]
    fn unknown_properties_ignored() {
        let style = compile(
            &[prop("futureThing", PropertyValue::Integer(7))],
            WidgetKind::Container,
        );
        assert_eq!(style, compile(&[], WidgetKind::Container));
    }

    #[test]
    fn malformed_values_become_absent_fields() {
        let style = compile(
            &[
                prop("backgroundColor", PropertyValue::Color("chartreuse".into())),
                prop("padding", PropertyValue::Text("only(up: 3)".into())),
                prop("fontWeight", PropertyValue::Text("heavy".into())),
                // Wrong slot for this name: elevation expects an integer.
                prop("elevation", PropertyValue::Text("4".into())),
            ],
            WidgetKind::Container,
        );
        assert_eq!(style.background, None);
        assert_eq!(style.padding, None);
        assert_eq!(style.font_weight, None);
        assert_eq!(style.shadow, None);
    }

    #[test]
    fn opacity_is_clamped() {
        let style = compile(
            &[prop("opacity", PropertyValue::Decimal(3.5))],
            WidgetKind::Image,
        );
        assert_eq!(style.opacity, Some(1.0));
    }

    proptest! {
        // Purity: identical inputs yield identical (deep-equal) output,
        // and no syntactically valid property list makes compile fail.
        #[test]
        fn compile_is_pure_and_total(
            width in proptest::option::of(-1000i64..10_000),
            color_str in "[#a-zA-Z0-9]{0,10}",
            pad in "[a-z0-9(),: ]{0,24}",
            weight in "[a-zA-Z0-9]{0,10}",
        ) {
            let mut props = Vec::new();
            if let Some(w) = width {
                props.push(prop("width", PropertyValue::Integer(w)));
            }
            props.push(prop("backgroundColor", PropertyValue::Color(color_str)));
            props.push(prop("padding", PropertyValue::Text(pad)));
            props.push(prop("fontWeight", PropertyValue::Text(weight)));

            let a = compile(&props, WidgetKind::Container);
            let b = compile(&props, WidgetKind::Container);
            prop_assert_eq!(a, b);
        }
    }
}
