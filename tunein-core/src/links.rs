//! Links pointing back into the mini app and out to the cast composer

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const COMPOSE_URL: &str = "https://warpcast.com/~/compose";

/// Percent-encode a single URI component
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Deep link that opens the app and joins `room`
#[must_use]
pub fn join_url(app_url: &str, room: &str) -> String {
    format!("{}/?join={}", base(app_url), encode_component(room))
}

/// Public listen page for `room`
#[must_use]
pub fn share_url(app_url: &str, room: &str) -> String {
    format!("{}/listen/{room}", base(app_url))
}

#[must_use]
pub fn share_text(title: &str) -> String {
    format!("Tune in to \"{title}\" on Farcaster Radio!")
}

/// Web composer prefilled with `text` and one embedded link
#[must_use]
pub fn compose_cast_url(text: &str, embed: &str) -> String {
    format!(
        "{COMPOSE_URL}?text={}&embeds[]={}",
        encode_component(text),
        encode_component(embed)
    )
}

fn base(app_url: &str) -> &str {
    app_url.trim_end_matches('/')
}
