//! 文字種の判定
//!
//! 分かち書きの前処理と学習データの組み立てで使用する文字クラスを定義します。
//! 英数字はASCIIの`[A-Za-z0-9]`のみ、漢字はCJK統合漢字（U+4E00..U+9FFF）のみを
//! 対象とします。全角英数字や記号は「単語文字」には含まれません。

/// ASCII英数字（`[A-Za-z0-9]`）かどうかを判定します。
#[inline(always)]
pub fn is_alpha_num(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// CJK統合漢字（U+4E00..U+9FFF）かどうかを判定します。
#[inline(always)]
pub fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// 単語を構成しうる文字（ASCII英数字または漢字）かどうかを判定します。
#[inline(always)]
pub fn is_word_char(c: char) -> bool {
    is_alpha_num(c) || is_cjk(c)
}

/// 句読点・記号類かどうかを判定します。
///
/// ASCIIの記号類に加えて、一般句読点・通貨記号・矢印・数学記号などの記号ブロック、
/// CJKの記号と句読点（U+3000..U+303F）、および半角・全角形（U+FF00..U+FFEF）を
/// まとめて句読点として扱います。
pub fn is_punct(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    matches!(c,
        // Latin-1 punctuation and symbols
        '\u{00A1}'..='\u{00BF}' | '\u{00D7}' | '\u{00F7}'
        // general punctuation
        | '\u{2000}'..='\u{206F}'
        // currency symbols
        | '\u{20A0}'..='\u{20CF}'
        // letterlike symbols, arrows, mathematical operators, misc technical, dingbats
        | '\u{2100}'..='\u{2BFF}'
        // CJK symbols and punctuation
        | '\u{3000}'..='\u{303F}'
        // CJK compatibility forms
        | '\u{FE30}'..='\u{FE4F}'
        // halfwidth and fullwidth forms
        | '\u{FF00}'..='\u{FFEF}'
    )
}

/// 文字列全体が句読点・記号類だけで構成されているかどうかを判定します。
///
/// 学習データの組み立て時に、句読点のみのトークンを除外するために使用します。
///
/// # 引数
///
/// * `s` - 判定対象の文字列
///
/// # 戻り値
///
/// すべての文字が句読点であれば`true`
pub fn is_punctuation(s: &str) -> bool {
    s.chars().all(is_punct)
}

/// 文字列に句読点・記号類が1文字でも含まれるかどうかを判定します。
pub fn contains_punctuation(s: &str) -> bool {
    s.chars().any(is_punct)
}
