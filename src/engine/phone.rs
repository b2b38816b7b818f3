//! Phone-number extraction.
//!
//! Mainland mobile numbers: 11 digits, leading 1, second digit 3-9. When a
//! text carries several (old number crossed out, a backup contact), the last
//! one is the one people mean.

/// The last mobile number in `text`, or empty when there is none.
pub fn extract(text: &str) -> String {
    regex!(r"1[3-9][0-9]{9}")
        .find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_number_embedded_in_text() {
        assert_eq!(extract("宝安区盘山路28号,张三，13956232345"), "13956232345");
    }

    #[test]
    fn the_last_of_several_numbers_wins() {
        assert_eq!(extract("旧号13811112222改用13933334444"), "13933334444");
    }

    #[test]
    fn second_digit_must_be_mobile_range() {
        assert_eq!(extract("12345678901"), "");
        assert_eq!(extract("10000000000"), "");
    }

    #[test]
    fn absence_is_an_empty_string() {
        assert_eq!(extract("盘山路28号幸福茶庄"), "");
        assert_eq!(extract(""), "");
    }
}
