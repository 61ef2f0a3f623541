//! Помощники отображения карточек постов.

/// Пастельный цвет для карточек без цвета. На сервер не отправляется.
///
/// `unit` возвращает значения из `[0, 1)`, например `js_sys::Math::random`.
pub fn fallback_color(mut unit: impl FnMut() -> f64) -> String {
    let hue = (unit() * 360.0).floor().clamp(0.0, 359.0) as u16;
    let saturation = 95 + (unit() * 6.0).floor().clamp(0.0, 5.0) as u8;
    let lightness = 95 + (unit() * 6.0).floor().clamp(0.0, 5.0) as u8;
    format!("hsl({hue}, {saturation}%, {lightness}%)")
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Подпись вида "Request | Math" под заголовком карточки.
pub fn card_label(kind: &str, category: &str) -> String {
    format!("{} | {}", capitalize(kind), capitalize(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_color_stays_in_pastel_band() {
        for unit in [0.0, 0.42, 0.999_999] {
            let color = fallback_color(|| unit);
            let inner = color
                .strip_prefix("hsl(")
                .and_then(|rest| rest.strip_suffix("%)"))
                .expect("hsl format");
            let parts: Vec<&str> = inner.split(", ").collect();
            let hue: u16 = parts[0].parse().expect("hue");
            let saturation: u8 = parts[1].trim_end_matches('%').parse().expect("saturation");
            let lightness: u8 = parts[2].parse().expect("lightness");

            assert!(hue < 360);
            assert!((95..=100).contains(&saturation));
            assert!((95..=100).contains(&lightness));
        }
    }

    #[test]
    fn capitalize_only_touches_first_char() {
        assert_eq!(capitalize("request"), "Request");
        assert_eq!(capitalize("other"), "Other");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn card_label_capitalizes_both_parts() {
        assert_eq!(card_label("offer", "coding"), "Offer | Coding");
    }
}
