//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Argus Configuration
# Only override what you want to change -- missing fields use defaults.
# Environment variables (ARK_API_KEY, AI_BASE_URL, AI_MODEL,
# AI_SYSTEM_PROMPT) take precedence over this file.

[ai]
# api_key = ""
# base_url = "https://ark.cn-beijing.volces.com/api/v3"
# model = ""
# system_prompt = "You are a concise monitoring assistant."

[storage]
# path = "/path/to/local_storage.json"

[logging]
# level = "INFO"          # DEBUG, INFO, WARNING, ERROR
"##
}
