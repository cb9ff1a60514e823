//! テキストブロックへの前分割
//!
//! 入力を「単語文字（ASCII英数字または漢字）かどうか」が一定の極大な連続区間に
//! 分割します。ブロックは遅延的に生成されるため、長い入力でもブロック列全体を
//! 先に構築することはありません。

use crate::chars::{is_alpha_num, is_word_char};

/// 前分割で得られる1つのブロック。
///
/// `pure_alpha_num`が真のブロックはASCII英数字だけから成り、分かち書きを
/// 経由せずそのまま1トークンとして出力されます。
pub(crate) struct TextBlock<'a> {
    pub(crate) runes: &'a [char],
    pub(crate) pure_alpha_num: bool,
}

/// 文字列をブロック列に分割するイテレータを返します。
pub(crate) fn blocks(runes: &[char]) -> Blocks<'_> {
    Blocks { runes, pos: 0 }
}

/// [`TextBlock`]を順に生成するイテレータ。
pub(crate) struct Blocks<'a> {
    runes: &'a [char],
    pos: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = TextBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.runes.len() {
            return None;
        }
        let start = self.pos;
        let in_word = is_word_char(self.runes[start]);
        let mut end = start + 1;
        while end < self.runes.len() && is_word_char(self.runes[end]) == in_word {
            end += 1;
        }
        self.pos = end;

        let runes = &self.runes[start..end];
        Some(TextBlock {
            runes,
            pure_alpha_num: runes.iter().copied().all(is_alpha_num),
        })
    }
}
