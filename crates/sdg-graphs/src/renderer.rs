//! Chart rendering trait and shared helpers.

use crate::{ChartKind, ColorScheme, GraphConfig};
use plotters::prelude::*;
use sdg_common::Result;

/// Renders one aggregate shape to SVG markup.
pub trait ChartRenderer {
    /// The aggregate this renderer draws.
    type Input: ?Sized;

    /// Which dashboard panel this renderer fills.
    fn kind(&self) -> ChartKind;

    /// Renders `input` to an SVG document.
    ///
    /// Fails with a graph error when `input` is empty.
    fn render_svg(&self, config: &GraphConfig, input: &Self::Input) -> Result<String>;

    /// Series colors for a scheme.
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        let colors: Vec<RGBColor> = match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
                RGBColor(188, 189, 34),  // Olive
                RGBColor(23, 190, 207),  // Cyan
            ],
            ColorScheme::Dark => vec![
                RGBColor(55, 126, 184),
                RGBColor(255, 152, 150),
                RGBColor(77, 175, 74),
                RGBColor(255, 187, 120),
                RGBColor(152, 78, 163),
            ],
            ColorScheme::Light => vec![
                RGBColor(166, 206, 227),
                RGBColor(251, 180, 174),
                RGBColor(179, 226, 205),
                RGBColor(253, 205, 172),
                RGBColor(203, 213, 232),
            ],
            ColorScheme::Vibrant => vec![
                RGBColor(230, 25, 75),
                RGBColor(60, 180, 75),
                RGBColor(255, 225, 25),
                RGBColor(0, 130, 200),
                RGBColor(245, 130, 48),
                RGBColor(145, 30, 180),
                RGBColor(70, 240, 240),
                RGBColor(240, 50, 230),
            ],
            ColorScheme::Monochrome => vec![
                RGBColor(0, 0, 0),
                RGBColor(64, 64, 64),
                RGBColor(128, 128, 128),
                RGBColor(192, 192, 192),
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .filter_map(|color| parse_color(color))
                .collect(),
        };

        if colors.is_empty() {
            vec![RGBColor(31, 119, 180)]
        } else {
            colors
        }
    }

    /// Background color, white unless configured.
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(WHITE)
    }
}

/// Parses a `#rrggbb` string.
pub fn parse_color(color: &str) -> Option<RGBColor> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Lower and upper bounds for a value axis, padded by a tenth of the span.
///
/// A flat range is widened so the axis never collapses. With `include_zero`
/// the range always spans zero, as bar charts require.
pub fn value_range<I>(values: I, include_zero: bool) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let (mut min, mut max) = values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((f64::min(lo, value), f64::max(hi, value))),
    })?;

    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let span = max - min;
    let padding = if span > 0.0 {
        span * 0.1
    } else {
        min.abs().max(1.0) * 0.1
    };

    let lower = if include_zero && min >= 0.0 {
        0.0
    } else {
        min - padding
    };
    let upper = if include_zero && max <= 0.0 && min < 0.0 {
        0.0
    } else {
        max + padding
    };

    Some((lower, upper))
}

/// Horizontal inset, in pixels, that leaves a gap between adjacent segments.
pub fn segment_inset(config: &GraphConfig, segments: usize) -> u32 {
    let margins = &config.style.margins;
    let plot_width = config
        .width
        .saturating_sub(margins.left + margins.right + 2 * margins.top);
    let segments = u32::try_from(segments.max(1)).unwrap_or(u32::MAX);
    (plot_width / segments / 5).clamp(1, 40)
}

/// Caption style from the configured title font.
pub fn title_style(config: &GraphConfig) -> (&str, f64) {
    let font = &config.style.title_font;
    (font.family.as_str(), f64::from(font.size))
}

/// Axis description style from the configured axis font.
pub fn axis_style(config: &GraphConfig) -> (&str, f64) {
    let font = &config.style.axis_font;
    (font.family.as_str(), f64::from(font.size))
}

/// Tick label style for an entity axis, turned a quarter so long names fit.
pub fn rotated_label_style(config: &GraphConfig) -> FontDesc<'_> {
    let font = &config.style.axis_font;
    (font.family.as_str(), f64::from(font.size))
        .into_font()
        .transform(FontTransform::Rotate90)
}

/// Height of an x label area holding `labels` drawn with
/// [`rotated_label_style`].
///
/// Grows with the longest label, never below the bottom margin and never
/// above half the chart.
pub fn rotated_label_area(config: &GraphConfig, labels: &[String]) -> u32 {
    let longest = labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let longest = u32::try_from(longest).unwrap_or(u32::MAX);
    let text = longest
        .saturating_mul(config.style.axis_font.size)
        .saturating_mul(3)
        / 5;

    text.saturating_add(30)
        .min(config.height / 2)
        .max(config.style.margins.bottom)
}

/// Label for the `index`-th category of a segmented axis.
pub fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => {
            labels.get(*index).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainRenderer;

    impl ChartRenderer for PlainRenderer {
        type Input = ();

        fn kind(&self) -> ChartKind {
            ChartKind::Bar
        }

        fn render_svg(&self, _config: &GraphConfig, _input: &()) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#1f77b4"), Some(RGBColor(31, 119, 180)));
        assert_eq!(parse_color(" #FFFFFF "), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_color("1f77b4"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_custom_colors_fall_back_when_unparsable() {
        let colors = PlainRenderer.get_colors(&ColorScheme::Custom(vec!["bad".to_string()]));
        assert_eq!(colors.len(), 1);

        let colors = PlainRenderer.get_colors(&ColorScheme::Custom(vec![
            "#000000".to_string(),
            "#ffffff".to_string(),
        ]));
        assert_eq!(colors, vec![RGBColor(0, 0, 0), RGBColor(255, 255, 255)]);
    }

    #[test]
    fn test_background_color() {
        let mut config = GraphConfig::default();
        config.style.background_color = Some("#000000".to_string());
        assert_eq!(PlainRenderer.get_background_color(&config), RGBColor(0, 0, 0));

        config.style.background_color = None;
        assert_eq!(PlainRenderer.get_background_color(&config), WHITE);
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(Vec::<f64>::new(), false), None);

        let (lo, hi) = value_range([10.0, 20.0], true).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);

        let (lo, hi) = value_range([-5.0, 5.0], false).unwrap();
        assert!(lo < -5.0 && hi > 5.0);

        let (lo, hi) = value_range([3.0], false).unwrap();
        assert!(lo < 3.0 && hi > 3.0);

        let (lo, hi) = value_range([0.0], true).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 0.0);

        let (lo, hi) = value_range([-4.0, -2.0], true).unwrap();
        assert!(lo < -4.0);
        assert_eq!(hi, 0.0);
    }

    #[test]
    fn test_segment_inset() {
        let config = GraphConfig::default();
        assert!(segment_inset(&config, 3) > segment_inset(&config, 30));
        assert_eq!(segment_inset(&config, 100_000), 1);
        assert!(segment_inset(&config, 0) <= 40);
    }

    #[test]
    fn test_rotated_label_area() {
        let config = GraphConfig::default();
        let short = vec!["fiji".to_string()];
        let long = vec!["federated states of micronesia".to_string()];

        assert_eq!(rotated_label_area(&config, &[]), config.style.margins.bottom);
        assert!(rotated_label_area(&config, &long) >= rotated_label_area(&config, &short));
        assert!(rotated_label_area(&config, &long) <= config.height / 2);

        let huge = vec!["x".repeat(10_000)];
        assert_eq!(rotated_label_area(&config, &huge), config.height / 2);
    }

    #[test]
    fn test_rotated_label_style() {
        let config = GraphConfig::default();
        let style = rotated_label_style(&config);

        assert!(matches!(style.get_transform(), FontTransform::Rotate90));
        assert_eq!(style.get_size(), f64::from(config.style.axis_font.size));
    }

    #[test]
    fn test_segment_label() {
        let labels = vec!["fiji".to_string(), "tonga".to_string()];
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(1)), "tonga");
        assert_eq!(segment_label(&labels, &SegmentValue::Exact(5)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::Last), "");
    }
}
