//! 화면/보고서용 숫자 표기. 계산 결과는 건드리지 않고 문자열만 만든다.

use crate::i18n::Language;

/// 정의되지 않은 값(NaN, ±∞)을 대신 표시하는 기호.
pub const SENTINEL: &str = "–";

const NBSP: char = '\u{a0}';

/// 언어별 자릿수 구분/소수점 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    group: char,
    decimal: char,
}

impl NumberFormat {
    pub fn for_language(lang: Language) -> Self {
        match lang {
            Language::Sv => Self {
                group: NBSP,
                decimal: ',',
            },
            Language::En => Self {
                group: ',',
                decimal: '.',
            },
        }
    }
}

/// 소수 자릿수를 지정해 천 단위 구분 기호와 함께 표기한다.
pub fn number(value: f64, decimals: usize, lang: Language) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    let fmt = NumberFormat::for_language(lang);
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(fmt.group);
        }
        grouped.push(ch);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(fmt.decimal);
        out.push_str(frac);
    }
    out
}

/// 통화(SEK) 표기. 정수로 반올림한다.
pub fn currency(value: f64, lang: Language) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    let n = number(value, 0, lang);
    match lang {
        Language::Sv => format!("{n}{NBSP}kr"),
        Language::En => format!("SEK{NBSP}{n}"),
    }
}

pub fn percent(value: f64, lang: Language) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    format!("{}{NBSP}%", number(value, 1, lang))
}

pub fn years(value: f64, lang: Language) -> String {
    number(value, 1, lang)
}
