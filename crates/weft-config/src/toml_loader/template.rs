//! Default TOML settings template with inline documentation comments.

/// Generate the default TOML settings content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# weft tiling settings
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

# Layout for desktops that have no saved configuration:
# "btree", "half", "three-column", "monocle" or "passthrough"
default_layout = "btree"

# Where new windows go: "left", "right" or "active"
# insertion_point = "left"

# Turn columns into rows
# rotate_layout = false

# Divider movement per resize step, as a fraction of the screen
# resize_amount = 0.05      # 0.01-0.5

# Quiet period before reacting to tile edits made by the host, in ms
# settle_delay_ms = 50      # 0-2000
"##
    .to_string()
}
