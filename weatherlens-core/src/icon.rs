/// Icon host used when the configuration does not name one.
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org";

/// URL of the large (4x) condition icon for a provider icon code such as `"04d"`.
pub fn icon_url(base_url: &str, icon_code: &str) -> String {
    format!("{}/img/wn/{icon_code}@4x.png", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_openweathermap_url() {
        assert_eq!(
            icon_url(DEFAULT_ICON_BASE_URL, "10n"),
            "https://openweathermap.org/img/wn/10n@4x.png"
        );
    }

    #[test]
    fn same_code_same_url() {
        for code in ["01d", "04n", "50d"] {
            assert_eq!(
                icon_url(DEFAULT_ICON_BASE_URL, code),
                icon_url(DEFAULT_ICON_BASE_URL, code)
            );
        }
        assert_ne!(
            icon_url(DEFAULT_ICON_BASE_URL, "01d"),
            icon_url(DEFAULT_ICON_BASE_URL, "01n")
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        assert_eq!(
            icon_url("https://icons.example/", "01d"),
            "https://icons.example/img/wn/01d@4x.png"
        );
    }
}
