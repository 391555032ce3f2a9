#![forbid(unsafe_code)]

//! The closed vocabulary of widget kinds.
//!
//! Every widget on the canvas is one of these variants. Capabilities
//! (may it own children? is it scrollable? …) are static per kind and
//! exposed as bitflags so structural checks never dispatch on strings.

use crate::geometry::Axis;
use crate::property::PropertyValue;
use bitflags::bitflags;

bitflags! {
    /// Static capabilities of a widget kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WidgetCaps: u8 {
        /// May own child widgets.
        const CONTAINER  = 1 << 0;
        /// Scrolls its content.
        const SCROLLABLE = 1 << 1;
        /// Accepts user input.
        const INPUT      = 1 << 2;
        /// Participates in app navigation chrome.
        const NAVIGATION = 1 << 3;
    }
}

/// Palette group a kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetGroup {
    /// Layout containers (rows, columns, stacks, …).
    Layout,
    /// Scrolling containers (lists, grids, carousels, …).
    Scrollable,
    /// Static display elements (text, images, dividers, …).
    Display,
    /// Interactive inputs (fields, buttons, toggles, …).
    Input,
    /// Navigation chrome (app bars, tab bars, drawers, …).
    Navigation,
    /// Embedded/advanced elements (maps, web views, …).
    Advanced,
}

/// A widget kind. Closed enum; extending it is a compile-time-checked
/// change (every `match` below is exhaustive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidgetKind {
    // --- Layout containers ---
    Container,
    Row,
    Column,
    Stack,
    Wrap,
    Card,
    Padding,
    Center,
    Align,
    SizedBox,
    SafeArea,
    Expanded,
    Form,
    ConditionalBuilder,
    // --- Scrollable containers ---
    ListView,
    GridView,
    PageView,
    ScrollView,
    Carousel,
    ExpansionTile,
    TabBarView,
    // --- Display ---
    Text,
    RichText,
    Icon,
    Image,
    CircleAvatar,
    Divider,
    Badge,
    Chip,
    ProgressBar,
    ProgressRing,
    Lottie,
    Markdown,
    QrCode,
    Timeline,
    // --- Input ---
    TextField,
    TextArea,
    Button,
    IconButton,
    Checkbox,
    Switch,
    Slider,
    RadioGroup,
    Dropdown,
    DatePicker,
    TimePicker,
    RatingBar,
    PinCode,
    ChoiceChips,
    // --- Navigation ---
    AppBar,
    TabBar,
    BottomNavBar,
    Drawer,
    FloatingActionButton,
    // --- Advanced ---
    Map,
    WebView,
    VideoPlayer,
}

impl WidgetKind {
    /// Static capability flags for this kind.
    #[must_use]
    pub const fn caps(self) -> WidgetCaps {
        use WidgetKind::*;
        match self {
            Container | Row | Column | Stack | Wrap | Card | Padding | Center | Align
            | SizedBox | SafeArea | Expanded | ConditionalBuilder => WidgetCaps::CONTAINER,
            Form => WidgetCaps::CONTAINER.union(WidgetCaps::INPUT),
            ListView | GridView | PageView | ScrollView | Carousel | ExpansionTile
            | TabBarView => WidgetCaps::CONTAINER.union(WidgetCaps::SCROLLABLE),
            Text | RichText | Icon | Image | CircleAvatar | Divider | Badge | Chip
            | ProgressBar | ProgressRing | Lottie | Markdown | QrCode | Timeline => {
                WidgetCaps::empty()
            }
            TextField | TextArea | Button | IconButton | Checkbox | Switch | Slider
            | RadioGroup | Dropdown | DatePicker | TimePicker | RatingBar | PinCode
            | ChoiceChips => WidgetCaps::INPUT,
            AppBar | Drawer => WidgetCaps::CONTAINER.union(WidgetCaps::NAVIGATION),
            TabBar | BottomNavBar => WidgetCaps::NAVIGATION,
            FloatingActionButton => WidgetCaps::NAVIGATION.union(WidgetCaps::INPUT),
            Map | WebView | VideoPlayer => WidgetCaps::empty(),
        }
    }

    /// Whether this kind may own child widgets.
    #[inline]
    #[must_use]
    pub const fn can_have_children(self) -> bool {
        self.caps().contains(WidgetCaps::CONTAINER)
    }

    /// Layout axis of this kind's direct children.
    ///
    /// Drives the insertion-index bisection on drop: row-like kinds
    /// bisect along x, everything else along y.
    #[must_use]
    pub const fn primary_axis(self) -> Axis {
        use WidgetKind::*;
        match self {
            Row | Wrap | Carousel | PageView | TabBar | BottomNavBar | ChoiceChips => {
                Axis::Horizontal
            }
            _ => Axis::Vertical,
        }
    }

    /// Palette group for this kind.
    #[must_use]
    pub const fn group(self) -> WidgetGroup {
        use WidgetKind::*;
        match self {
            Container | Row | Column | Stack | Wrap | Card | Padding | Center | Align
            | SizedBox | SafeArea | Expanded | Form | ConditionalBuilder => WidgetGroup::Layout,
            ListView | GridView | PageView | ScrollView | Carousel | ExpansionTile
            | TabBarView => WidgetGroup::Scrollable,
            Text | RichText | Icon | Image | CircleAvatar | Divider | Badge | Chip
            | ProgressBar | ProgressRing | Lottie | Markdown | QrCode | Timeline => {
                WidgetGroup::Display
            }
            TextField | TextArea | Button | IconButton | Checkbox | Switch | Slider
            | RadioGroup | Dropdown | DatePicker | TimePicker | RatingBar | PinCode
            | ChoiceChips => WidgetGroup::Input,
            AppBar | TabBar | BottomNavBar | Drawer | FloatingActionButton => {
                WidgetGroup::Navigation
            }
            Map | WebView | VideoPlayer => WidgetGroup::Advanced,
        }
    }

    /// Human-readable name, used in the layer tree and by tree search.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        use WidgetKind::*;
        match self {
            Container => "Container",
            Row => "Row",
            Column => "Column",
            Stack => "Stack",
            Wrap => "Wrap",
            Card => "Card",
            Padding => "Padding",
            Center => "Center",
            Align => "Align",
            SizedBox => "SizedBox",
            SafeArea => "SafeArea",
            Expanded => "Expanded",
            Form => "Form",
            ConditionalBuilder => "ConditionalBuilder",
            ListView => "ListView",
            GridView => "GridView",
            PageView => "PageView",
            ScrollView => "ScrollView",
            Carousel => "Carousel",
            ExpansionTile => "ExpansionTile",
            TabBarView => "TabBarView",
            Text => "Text",
            RichText => "RichText",
            Icon => "Icon",
            Image => "Image",
            CircleAvatar => "CircleAvatar",
            Divider => "Divider",
            Badge => "Badge",
            Chip => "Chip",
            ProgressBar => "ProgressBar",
            ProgressRing => "ProgressRing",
            Lottie => "Lottie",
            Markdown => "Markdown",
            QrCode => "QrCode",
            Timeline => "Timeline",
            TextField => "TextField",
            TextArea => "TextArea",
            Button => "Button",
            IconButton => "IconButton",
            Checkbox => "Checkbox",
            Switch => "Switch",
            Slider => "Slider",
            RadioGroup => "RadioGroup",
            Dropdown => "Dropdown",
            DatePicker => "DatePicker",
            TimePicker => "TimePicker",
            RatingBar => "RatingBar",
            PinCode => "PinCode",
            ChoiceChips => "ChoiceChips",
            AppBar => "AppBar",
            TabBar => "TabBar",
            BottomNavBar => "BottomNavBar",
            Drawer => "Drawer",
            FloatingActionButton => "FloatingActionButton",
            Map => "Map",
            WebView => "WebView",
            VideoPlayer => "VideoPlayer",
        }
    }

    /// The default property template instantiated when a widget of this
    /// kind is dropped onto the canvas.
    ///
    /// Names here are the vocabulary the style compiler understands; see
    /// `maquette-style`. Kinds without a specific template get an empty
    /// set (render defaults apply downstream).
    #[must_use]
    pub fn default_properties(self) -> Vec<(&'static str, PropertyValue)> {
        use PropertyValue as V;
        use WidgetKind::*;
        match self {
            Container | Card => vec![
                ("width", V::Integer(100)),
                ("height", V::Integer(100)),
                ("backgroundColor", V::Color("#FFFFFF".into())),
                ("borderRadius", V::Integer(0)),
                ("padding", V::Text("0".into())),
            ],
            Row | Column | Wrap => vec![
                ("mainAxisAlignment", V::Alignment("start".into())),
                ("crossAxisAlignment", V::Alignment("center".into())),
                ("mainAxisSize", V::Text("max".into())),
            ],
            Stack => vec![("alignment", V::Alignment("topLeft".into()))],
            Padding => vec![("padding", V::Text("all(8)".into()))],
            SizedBox => vec![("width", V::Integer(50)), ("height", V::Integer(50))],
            ListView | GridView | ScrollView => vec![
                ("padding", V::Text("0".into())),
                ("shrinkWrap", V::Boolean(false)),
            ],
            Text | RichText | Markdown => vec![
                ("text", V::Text("Hello World".into())),
                ("fontSize", V::Integer(14)),
                ("fontWeight", V::Text("normal".into())),
                ("textColor", V::Color("#14181B".into())),
            ],
            Icon => vec![
                ("icon", V::Text("star".into())),
                ("color", V::Color("#14181B".into())),
                ("fontSize", V::Integer(24)),
            ],
            Image | Lottie | VideoPlayer => vec![
                ("url", V::Url(String::new())),
                ("width", V::Integer(100)),
                ("height", V::Integer(100)),
            ],
            Divider => vec![
                ("height", V::Integer(1)),
                ("color", V::Color("#E0E3E7".into())),
            ],
            Button | IconButton | FloatingActionButton => vec![
                ("text", V::Text("Button".into())),
                ("backgroundColor", V::Color("#4B39EF".into())),
                ("textColor", V::Color("#FFFFFF".into())),
                ("borderRadius", V::Integer(8)),
                ("elevation", V::Integer(2)),
                ("onTap", V::ActionRef(0)),
            ],
            TextField | TextArea | PinCode => vec![
                ("hintText", V::Text("Enter text...".into())),
                ("fontSize", V::Integer(14)),
                ("borderColor", V::Color("#E0E3E7".into())),
                ("borderWidth", V::Integer(1)),
                ("borderRadius", V::Integer(8)),
            ],
            Checkbox | Switch => vec![("value", V::Boolean(false))],
            Slider | RatingBar => vec![("value", V::Decimal(0.0))],
            AppBar => vec![
                ("backgroundColor", V::Color("#4B39EF".into())),
                ("elevation", V::Integer(4)),
            ],
            WebView | Map => vec![("url", V::Url(String::new()))],
            _ => Vec::new(),
        }
    }

    /// All kinds, in palette order. Exposed for the palette UI and tests.
    #[must_use]
    pub const fn all() -> &'static [WidgetKind] {
        use WidgetKind::*;
        &[
            Container,
            Row,
            Column,
            Stack,
            Wrap,
            Card,
            Padding,
            Center,
            Align,
            SizedBox,
            SafeArea,
            Expanded,
            Form,
            ConditionalBuilder,
            ListView,
            GridView,
            PageView,
            ScrollView,
            Carousel,
            ExpansionTile,
            TabBarView,
            Text,
            RichText,
            Icon,
            Image,
            CircleAvatar,
            Divider,
            Badge,
            Chip,
            ProgressBar,
            ProgressRing,
            Lottie,
            Markdown,
            QrCode,
            Timeline,
            TextField,
            TextArea,
            Button,
            IconButton,
            Checkbox,
            Switch,
            Slider,
            RadioGroup,
            Dropdown,
            DatePicker,
            TimePicker,
            RatingBar,
            PinCode,
            ChoiceChips,
            AppBar,
            TabBar,
            BottomNavBar,
            Drawer,
            FloatingActionButton,
            Map,
            WebView,
            VideoPlayer,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_can_have_children() {
        assert!(WidgetKind::Container.can_have_children());
        assert!(WidgetKind::Row.can_have_children());
        assert!(WidgetKind::ListView.can_have_children());
        assert!(WidgetKind::Drawer.can_have_children());
    }

    #[test]
    fn leaves_cannot_have_children() {
        assert!(!WidgetKind::Text.can_have_children());
        assert!(!WidgetKind::Button.can_have_children());
        assert!(!WidgetKind::Image.can_have_children());
        assert!(!WidgetKind::Map.can_have_children());
    }

    #[test]
    fn row_like_kinds_are_horizontal() {
        assert_eq!(WidgetKind::Row.primary_axis(), Axis::Horizontal);
        assert_eq!(WidgetKind::Carousel.primary_axis(), Axis::Horizontal);
        assert_eq!(WidgetKind::Column.primary_axis(), Axis::Vertical);
        assert_eq!(WidgetKind::Container.primary_axis(), Axis::Vertical);
    }

    #[test]
    fn scrollable_kinds_are_also_containers() {
        for kind in [WidgetKind::ListView, WidgetKind::GridView, WidgetKind::PageView] {
            assert!(kind.caps().contains(WidgetCaps::SCROLLABLE));
            assert!(kind.can_have_children(), "{kind:?} should accept children");
        }
    }

    #[test]
    fn display_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in WidgetKind::all() {
            assert!(
                seen.insert(kind.display_name()),
                "duplicate display name {}",
                kind.display_name()
            );
        }
    }

    #[test]
    fn vocabulary_size() {
        assert!(WidgetKind::all().len() >= 50);
    }

    #[test]
    fn default_template_names_unique_per_kind() {
        for kind in WidgetKind::all() {
            let props = kind.default_properties();
            let mut seen = std::collections::HashSet::new();
            for (name, _) in &props {
                assert!(seen.insert(*name), "{kind:?} template repeats {name}");
            }
        }
    }

    #[test]
    fn button_template_has_action_slot() {
        let props = WidgetKind::Button.default_properties();
        assert!(props.iter().any(|(n, _)| *n == "onTap"));
    }
}
