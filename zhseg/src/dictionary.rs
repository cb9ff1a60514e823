//! 頻度辞書
//!
//! このモジュールは、単語とその出現頻度を保持する不変の辞書を提供します。
//! 辞書はDAGベースの分かち書きで候補列挙と対数確率の計算に使用されます。
//!
//! 辞書ファイルは1行に「単語 [頻度]」を書くUTF-8テキストです。頻度が省略された
//! 行には既定値20000が割り当てられ、数値として解釈できない頻度は1.0に落とされます。
//! 複数ファイルを重ねて読み込むと、後から読んだエントリが先のエントリを上書きします
//! （コア辞書 → ベース辞書 → ユーザー辞書の階層構成を想定）。

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;

use crate::errors::Result;

/// 頻度が書かれていないエントリに与える既定頻度。
const DEFAULT_FREQ: f64 = 20000.0;

/// 頻度欄が数値として解釈できなかったエントリに与える頻度。
const FALLBACK_FREQ: f64 = 1.0;

/// 未知語に与える対数確率の下限（スムージング定数）。
///
/// 辞書に存在しない単位へのペナルティとして、DAGのスコア計算でも使用されます。
/// 実用的な辞書に現れる単語の対数確率より必ず小さくなるように選ばれています。
pub const OOV_LOG_PROB: f64 = -20.0;

/// 単語と頻度を保持する辞書。
///
/// 構築後は不変として扱い、[`Segmenter`](crate::Segmenter)からは共有参照で
/// 読み取ります。辞書の入れ替えは上位層で`Segmenter`ごと差し替えることで行います。
#[derive(Default, Clone, Debug)]
pub struct Dictionary {
    pub(crate) words: HashMap<String, f64>,
    pub(crate) total: f64,
    pub(crate) max_len: usize,
}

impl Dictionary {
    /// 新しい空の辞書を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定されたパスから辞書エントリを読み込みます。
    ///
    /// 既存のエントリに重ねて読み込まれます。同じ単語が再び現れた場合、
    /// 保持される頻度は後から読んだ値ですが、総頻度には両方の値が加算されます。
    ///
    /// # 引数
    ///
    /// * `path` - 辞書ファイルのパス
    ///
    /// # エラー
    ///
    /// ファイルが開けない・読めない場合、I/Oエラーが返されます。
    pub fn load_from_path<P>(&mut self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.load_from_reader(File::open(path)?)
    }

    /// 指定されたリーダーから辞書エントリを読み込みます。
    ///
    /// 空行は読み飛ばされます。行の1列目が単語、2列目（任意）が頻度です。
    ///
    /// # 引数
    ///
    /// * `rdr` - 辞書のリーダー
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、I/Oエラーが返されます。
    pub fn load_from_reader<R>(&mut self, rdr: R) -> Result<()>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);
        for line in buf.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let word = match fields.next() {
                Some(word) => word,
                None => continue,
            };
            let freq = match fields.next() {
                Some(field) => field.parse().unwrap_or(FALLBACK_FREQ),
                None => DEFAULT_FREQ,
            };
            self.insert(word, freq);
        }
        Ok(())
    }

    /// 単語を辞書に追加します。
    ///
    /// 同じ単語が既に存在する場合、保持される頻度は新しい値で上書きされますが、
    /// 総頻度には新しい値がそのまま加算されます。
    ///
    /// # 引数
    ///
    /// * `word` - 追加する単語
    /// * `freq` - 出現頻度（正の有限値）
    pub fn insert(&mut self, word: &str, freq: f64) {
        self.words.insert(word.to_string(), freq);
        self.total += freq;
        self.max_len = self.max_len.max(word.chars().count());
    }

    /// 単語が辞書に存在するかどうかを判定します。
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// 単語の頻度を返します。
    ///
    /// # 戻り値
    ///
    /// 辞書に存在すれば頻度、存在しなければ`None`
    #[inline]
    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    /// 単語の対数確率 `ln(freq / total)` を返します。
    ///
    /// 総頻度が0以下の場合、または単語が辞書に存在しない場合は
    /// スムージング定数[`OOV_LOG_PROB`]を返します。
    pub fn log_probability(&self, word: &str) -> f64 {
        if self.total <= 0.0 {
            return OOV_LOG_PROB;
        }
        match self.words.get(word) {
            Some(freq) => (freq / self.total).ln(),
            None => OOV_LOG_PROB,
        }
    }

    /// 辞書中の全エントリの総頻度を返します。
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// 辞書中の最長単語の文字数を返します。
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// エントリ数を返します。
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// 辞書が空かどうかを判定します。
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
