//! Key names and suffix classification used by the rewrite rules.

/// Opaque prop payload; never traversed.
pub const PASS_PROPS: &str = "passProps";
/// Nested component node.
pub const COMPONENT: &str = "component";
/// Explicit component identifier on component nodes and button descriptors.
pub const ID: &str = "id";
/// Resolved identifier written onto component nodes.
pub const COMPONENT_ID: &str = "componentId";

/// Id category requested for components without an explicit `id`.
pub const CUSTOM_COMPONENT_CATEGORY: &str = "CustomComponent";

/// Written in place of an explicit `null` color.
pub const NO_COLOR: &str = "NoColor";

/// `color`, or any key ending in `Color` (`backgroundColor`, `textColor`).
pub fn is_color_key(key: &str) -> bool {
    key == "color" || key.ends_with("Color")
}

/// `icon`, `image`, or any key ending in `Icon` / `Image`.
pub fn is_image_key(key: &str) -> bool {
    key == "icon" || key == "image" || key.ends_with("Icon") || key.ends_with("Image")
}

/// Any key ending in `Buttons` (`leftButtons`, `rightButtons`).
pub fn is_buttons_key(key: &str) -> bool {
    key.ends_with("Buttons")
}
