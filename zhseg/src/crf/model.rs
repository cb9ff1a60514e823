//! CRFモデルのデータ構造と入出力
//!
//! モデルは4×4の遷移重み行列と、素性文字列ごとの疎な重みテーブルから成ります。
//! 重みテーブルの行は4タグ分の密なスロットで持ちますが、4スロットすべてが
//! ちょうど0.0になった行は保持しません（ゼロ重みを保存しない不変条件）。
//!
//! モデルファイルは1行1レコードのUTF-8テキストです。
//!
//! ```text
//! T <FROM> <TO> <WEIGHT>        遷移重み（FROM/TO ∈ {B,M,E,S}）
//! F <FEATURE> <TAG> <WEIGHT>    素性重み（FEATUREは空白を含まない文字列）
//! ```
//!
//! 空行と`#`で始まる行は読み飛ばされます。タグや重みが不正な行、先頭トークンが
//! 未知の行は、エラーにせず捨てられます。

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use hashbrown::HashMap;

use crate::crf::Tag;
use crate::errors::Result;

/// 線形連鎖CRFモデル。
///
/// 学習（[`Trainer`](crate::trainer::Trainer)）中は可変ですが、復号時には
/// 読み取り専用として扱い、[`Segmenter`](crate::Segmenter)からは共有参照で
/// アクセスします。
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Model {
    /// 遷移重み。`trans[from][to]`が遷移`from → to`の重みです。
    pub(crate) trans: [[f64; Tag::COUNT]; Tag::COUNT],

    /// 素性重み。素性文字列から4タグ分の重みスロットへの疎な写像です。
    pub(crate) feats: HashMap<String, [f64; Tag::COUNT]>,
}

impl Model {
    /// 新しい空のモデルを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定されたパスからモデルを読み込みます。
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

    /// 指定されたリーダーからモデルを読み込みます。
    ///
    /// 不正な行は読み飛ばされます。同じレコードが複数回現れた場合は
    /// 後の値が勝ちます。
    ///
    /// # 引数
    ///
    /// * `rdr` - モデルのリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたモデル
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);
        let mut model = Self::new();
        for line in buf.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                continue;
            }
            match fields[0] {
                "T" => {
                    if let (Ok(from), Ok(to), Ok(weight)) = (
                        fields[1].parse::<Tag>(),
                        fields[2].parse::<Tag>(),
                        fields[3].parse::<f64>(),
                    ) {
                        model.trans[from.index()][to.index()] = weight;
                    }
                }
                "F" => {
                    if let (Ok(tag), Ok(weight)) =
                        (fields[2].parse::<Tag>(), fields[3].parse::<f64>())
                    {
                        if weight != 0.0 {
                            model
                                .feats
                                .entry(fields[1].to_string())
                                .or_insert([0.0; Tag::COUNT])[tag.index()] = weight;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(model)
    }

    /// モデルを指定されたパスに保存します。
    ///
    /// # エラー
    ///
    /// ファイルの作成または書き込みに失敗した場合、I/Oエラーが返されます。
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut wtr = BufWriter::new(File::create(path)?);
        self.write_to(&mut wtr)?;
        wtr.flush()?;
        Ok(())
    }

    /// モデルを指定されたシンクに書き出します。
    ///
    /// 重みが0でない遷移と素性のみを出力します。出力順は決定的で、遷移は
    /// タグ順、素性は素性文字列の辞書順です。重みはRustの既定の浮動小数点
    /// 表記（最短の正確な表現）で書かれるため、読み戻すと元の値に正確に
    /// 一致します。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    pub fn write_to<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        for from in Tag::ALL {
            for to in Tag::ALL {
                let weight = self.trans[from.index()][to.index()];
                if weight != 0.0 {
                    writeln!(wtr, "T {} {} {}", from, to, weight)?;
                }
            }
        }

        let mut feats: Vec<&String> = self.feats.keys().collect();
        feats.sort_unstable();
        for feat in feats {
            let row = &self.feats[feat];
            for tag in Tag::ALL {
                let weight = row[tag.index()];
                if weight != 0.0 {
                    writeln!(wtr, "F {} {} {}", feat, tag, weight)?;
                }
            }
        }
        Ok(())
    }

    /// 遷移`from → to`の重みを返します。
    #[inline]
    pub fn transition(&self, from: Tag, to: Tag) -> f64 {
        self.trans[from.index()][to.index()]
    }

    /// 遷移`from → to`の重みに`delta`を加算します。
    #[inline]
    pub fn update_transition(&mut self, from: Tag, to: Tag, delta: f64) {
        self.trans[from.index()][to.index()] += delta;
    }

    /// 素性`feat`のタグ`tag`に対する重みを返します。
    ///
    /// 保存されていないエントリの重みは0.0です。
    #[inline]
    pub fn emission(&self, feat: &str, tag: Tag) -> f64 {
        match self.feats.get(feat) {
            Some(row) => row[tag.index()],
            None => 0.0,
        }
    }

    /// 素性`feat`のタグ`tag`に対する重みに`delta`を加算します。
    ///
    /// 加算の結果、行の4スロットすべてがちょうど0.0になった場合、
    /// その素性の行ごと削除されます。この操作により「ゼロ重みを保存しない」
    /// 不変条件が保たれます。
    ///
    /// # 引数
    ///
    /// * `feat` - 素性文字列
    /// * `tag` - 更新対象のタグ
    /// * `delta` - 重みへの加算値
    pub fn update_emission(&mut self, feat: &str, tag: Tag, delta: f64) {
        let row = self.feats.entry_ref(feat).or_insert([0.0; Tag::COUNT]);
        row[tag.index()] += delta;
        let all_zero = row.iter().all(|&w| w == 0.0);
        if all_zero {
            self.feats.remove(feat);
        }
    }

    /// 重みが保存されている素性の数を返します。
    #[inline]
    pub fn num_features(&self) -> usize {
        self.feats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load() {
        let data = "\
# comment line
T B E 10.5
F U00:我 S 5.0

T B M 2
F U02:的 B -1.5
X unknown record 1
T B Q 3
F U02:的 ? 3
F U02:的 E nan?
T B E
";
        let model = Model::from_reader(data.as_bytes()).unwrap();

        assert_eq!(10.5, model.transition(Tag::B, Tag::E));
        assert_eq!(2.0, model.transition(Tag::B, Tag::M));
        assert_eq!(0.0, model.transition(Tag::M, Tag::E));
        assert_eq!(5.0, model.emission("U00:我", Tag::S));
        assert_eq!(-1.5, model.emission("U02:的", Tag::B));
        assert_eq!(0.0, model.emission("U02:的", Tag::E));
        assert_eq!(2, model.num_features());
    }

    #[test]
    fn test_save_round_trip() {
        let mut model = Model::new();
        model.update_transition(Tag::B, Tag::E, 10.5);
        model.update_transition(Tag::S, Tag::B, -3.25);
        model.update_emission("U00:我", Tag::S, 5.0);
        model.update_emission("U02:京", Tag::M, 0.1);

        let mut buf = vec![];
        model.write_to(&mut buf).unwrap();
        let reloaded = Model::from_reader(buf.as_slice()).unwrap();

        assert_eq!(model, reloaded);
    }

    #[test]
    fn test_save_is_deterministic() {
        let mut model = Model::new();
        model.update_emission("U02:市", Tag::E, 1.0);
        model.update_emission("U00:南", Tag::B, 2.0);
        model.update_transition(Tag::B, Tag::E, 1.0);

        let mut first = vec![];
        model.write_to(&mut first).unwrap();
        let mut second = vec![];
        model.write_to(&mut second).unwrap();

        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        // Transitions precede features, and features are sorted.
        assert_eq!(
            vec!["T B E 1", "F U00:南 B 2", "F U02:市 E 1"],
            text.lines().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_update_emission_elides_zero_rows() {
        let mut model = Model::new();
        model.update_emission("U02:长", Tag::B, 1.0);
        assert_eq!(1, model.num_features());

        model.update_emission("U02:长", Tag::B, -1.0);
        assert_eq!(0, model.num_features());
        assert!(!model.feats.contains_key("U02:长"));
    }

    #[test]
    fn test_update_emission_inverse_restores_model() {
        let mut model = Model::new();
        model.update_emission("U01:江", Tag::M, 2.0);
        let snapshot = model.clone();

        model.update_emission("U03:大", Tag::E, 7.0);
        model.update_emission("U03:大", Tag::E, -7.0);
        model.update_emission("U01:江", Tag::M, 3.0);
        model.update_emission("U01:江", Tag::M, -3.0);

        assert_eq!(snapshot, model);
    }

    #[test]
    fn test_load_skips_zero_weight_features() {
        let data = "F U02:的 B 0\nF U02:的 E 0.0\n";
        let model = Model::from_reader(data.as_bytes()).unwrap();
        assert_eq!(0, model.num_features());
    }
}
