//! Generated-media URL builders.
//!
//! Image and meme generation are pure URL-construction concerns; the
//! services render on fetch, so no request is made here.

const IMAGE_ENDPOINT: &str = "https://image.pollinations.ai/prompt";
const MEME_ENDPOINT: &str = "https://api.memegen.link/images/custom/_";
const MEME_BACKGROUND: &str = "https://i.imgur.com/8KcYpGf.png";

/// URL rendering an image for `prompt`.
pub fn image_url(prompt: &str) -> String {
    format!("{IMAGE_ENDPOINT}/{}", urlencoding::encode(prompt))
}

/// URL rendering a meme captioned with `text`.
pub fn meme_url(text: &str) -> String {
    // The meme service takes its caption as a path segment with underscores
    // for spaces.
    let caption = text.replace(' ', "_");
    format!("{MEME_ENDPOINT}/{caption}.png?background={MEME_BACKGROUND}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_escapes_prompt() {
        let url = image_url("a red fox");
        assert_eq!(url, "https://image.pollinations.ai/prompt/a%20red%20fox");
    }

    #[test]
    fn test_meme_url_underscores_spaces() {
        let url = meme_url("such code much wow");
        assert!(url.contains("/such_code_much_wow.png"));
        assert!(url.contains("background="));
    }
}
