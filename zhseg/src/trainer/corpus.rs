//! 学習データの組み立て
//!
//! 分かち書き済みコーパス（1行1文、空白区切り）と、必要に応じて辞書ファイルから、
//! B/M/E/Sの正解タグ付き文を組み立てます。句読点だけのトークンは学習対象から
//! 除外されます。

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::Deref;
use std::path::Path;

use crate::chars::is_punctuation;
use crate::crf::Tag;
use crate::errors::Result;

/// コーパス読み込みの行バッファ容量（1 MiB）。
///
/// コーパスの1行は64 KiBを超えることがあります。
const LINE_BUFFER_CAPACITY: usize = 1024 * 1024;

/// 正解タグ付きの学習文。
///
/// 文字列とタグ列は常に同じ長さです。
pub struct Sentence {
    pub(crate) runes: Vec<char>,
    pub(crate) tags: Vec<Tag>,
}

impl Sentence {
    /// 文の文字列を返します。
    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    /// 文の正解タグ列を返します。
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// 長さ`len`の単語の正解タグ列を`tags`に追記します。
///
/// 1文字語は`S`、それ以外は`B`、`M`×(len−2)、`E`です。
fn append_gold_tags(tags: &mut Vec<Tag>, len: usize) {
    if len == 1 {
        tags.push(Tag::S);
    } else {
        tags.push(Tag::B);
        for _ in 0..len - 2 {
            tags.push(Tag::M);
        }
        tags.push(Tag::E);
    }
}

/// 学習文の集合。
#[derive(Default)]
pub struct Corpus {
    pub(crate) sentences: Vec<Sentence>,
}

impl Corpus {
    /// 新しい空のコーパスを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定されたパスからコーパスを読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルが開けない・読めない場合、I/Oエラーが返されます。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }

    /// 指定されたリーダーからコーパスを読み込みます。
    ///
    /// 1行が1文で、正解の単語が空白で区切られている形式を想定しています。
    ///
    /// # 引数
    ///
    /// * `rdr` - コーパスのリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたコーパス
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut corpus = Self::new();
        corpus.append_from_reader(rdr)?;
        Ok(corpus)
    }

    /// 指定されたリーダーのコーパスを既存の文に追加で読み込みます。
    ///
    /// 句読点だけの単語は捨てられます。残った単語が1つもない行は文として
    /// 追加されません。
    pub fn append_from_reader<R>(&mut self, rdr: R) -> Result<()>
    where
        R: Read,
    {
        let buf = BufReader::with_capacity(LINE_BUFFER_CAPACITY, rdr);
        for line in buf.lines() {
            let line = line?;
            let mut runes = vec![];
            let mut tags = vec![];
            for word in line.split_whitespace() {
                if is_punctuation(word) {
                    continue;
                }
                let before = runes.len();
                runes.extend(word.chars());
                append_gold_tags(&mut tags, runes.len() - before);
            }
            if !runes.is_empty() {
                self.sentences.push(Sentence { runes, tags });
            }
        }
        Ok(())
    }

    /// 指定されたパスの辞書エントリを1語文として追加で読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルが開けない・読めない場合、I/Oエラーが返されます。
    pub fn append_dict_from_path<P>(&mut self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.append_dict_from_reader(File::open(path)?)
    }

    /// 指定されたリーダーの辞書エントリを1語文として追加で読み込みます。
    ///
    /// 各行の1列目（単語）だけを使い、頻度欄は無視します。句読点だけの
    /// エントリは捨てられます。
    pub fn append_dict_from_reader<R>(&mut self, rdr: R) -> Result<()>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);
        for line in buf.lines() {
            let line = line?;
            let word = match line.split_whitespace().next() {
                Some(word) => word,
                None => continue,
            };
            if is_punctuation(word) {
                continue;
            }
            let runes: Vec<char> = word.chars().collect();
            let mut tags = vec![];
            append_gold_tags(&mut tags, runes.len());
            self.sentences.push(Sentence { runes, tags });
        }
        Ok(())
    }
}

impl Deref for Corpus {
    type Target = [Sentence];

    fn deref(&self) -> &Self::Target {
        &self.sentences
    }
}
