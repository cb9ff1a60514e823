//! 分かち書きエンジン
//!
//! このモジュールは、辞書ベースのDAG分割とCRFタグ付けを組み合わせた
//! 中国語の分かち書きを提供します。
//!
//! # 分割モード
//!
//! - [`Mode::Dag`]: 辞書のDAGに対する最大対数確率の動的計画法のみを使用します。
//! - [`Mode::Crf`]: CRFモデルのViterbi復号のみを使用します。
//! - [`Mode::Hybrid`]: 複数文字の辞書ヒットを信頼し、残った1文字の連なり
//!   （未知語の候補）だけをCRFに委ねます。
//!
//! モデルが設定されていない場合、CRF系のモードはDAGにフォールバックします。
//!
//! # 例
//!
//! ```
//! use std::sync::Arc;
//! use zhseg::{Dictionary, Mode, Segmenter};
//!
//! let mut dict = Dictionary::new();
//! dict.insert("南京市", 100.0);
//! dict.insert("长江大桥", 100.0);
//! dict.insert("南京", 10.0);
//! dict.insert("大桥", 10.0);
//!
//! let segmenter = Segmenter::new(Arc::new(dict));
//! let tokens = segmenter.cut("南京市长江大桥", Mode::Dag);
//! assert_eq!(tokens, ["南京市", "长江大桥"]);
//! ```

mod blocks;

use std::str::FromStr;
use std::sync::Arc;

use crate::chars::is_alpha_num;
use crate::crf::{Model, Tag};
use crate::dictionary::{Dictionary, OOV_LOG_PROB};
use crate::errors::ZhsegError;
use crate::segmenter::blocks::blocks;

/// 分割アルゴリズムのモード。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// 辞書ベースのDAG分割（既定値）
    #[default]
    Dag,
    /// CRFモデルによる分割
    Crf,
    /// 辞書優先、未知語のみCRFに委ねるハイブリッド分割
    Hybrid,
}

impl FromStr for Mode {
    type Err = ZhsegError;

    /// 文字列からモードをパースします。
    ///
    /// `dag`/`crf`/`hybrid`のいずれかを受け付けます。
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "dag" => Ok(Self::Dag),
            "crf" => Ok(Self::Crf),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(ZhsegError::invalid_argument(
                "mode",
                format!("mode must be one of dag/crf/hybrid: {}", mode),
            )),
        }
    }
}

/// DAGの動的計画法で使うノード。
///
/// ある開始位置からの最良の対数確率と、そのときの単語終端（両端含む）を保持します。
#[derive(Clone, Copy)]
struct RouteNode {
    prob: f64,
    end: usize,
}

/// 分かち書きを行うセグメンター。
///
/// 辞書と（任意で）CRFモデルへの共有参照を保持します。構築後の辞書とモデルは
/// 不変であり、セグメンターは複数スレッドから同時に読み取れます。モデルの
/// 入れ替えは、上位層で新しい`Segmenter`を構築して参照ごと差し替えることで
/// 行います。
pub struct Segmenter {
    dict: Arc<Dictionary>,
    model: Option<Arc<Model>>,
}

impl Segmenter {
    /// 指定された辞書で新しいセグメンターを作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 頻度辞書への共有参照
    pub fn new(dict: Arc<Dictionary>) -> Self {
        Self { dict, model: None }
    }

    /// CRFモデルを設定します。
    ///
    /// # 引数
    ///
    /// * `model` - CRFモデルへの共有参照
    ///
    /// # 戻り値
    ///
    /// モデルが設定された`Segmenter`インスタンス
    pub fn with_model(mut self, model: Arc<Model>) -> Self {
        self.model = Some(model);
        self
    }

    /// 辞書への参照を返します。
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// CRFモデルへの参照を返します。
    pub fn model(&self) -> Option<&Model> {
        self.model.as_deref()
    }

    /// テキストを分かち書きしてトークン列を返します。
    ///
    /// 入力はまず文字クラスによるブロックに前分割されます。ASCII英数字だけの
    /// ブロックはそのまま1トークンとして出力され、それ以外のブロックが指定
    /// モードの分割器にかけられます。各ブロック内でトークンの連結は元の
    /// 文字列に一致します。
    ///
    /// # 引数
    ///
    /// * `text` - 入力テキスト
    /// * `mode` - 分割モード
    ///
    /// # 戻り値
    ///
    /// 入力順のトークン列。空の入力には空の列を返します。
    pub fn cut(&self, text: &str, mode: Mode) -> Vec<String> {
        let runes: Vec<char> = text.chars().collect();
        let mut result = vec![];
        for block in blocks(&runes) {
            if block.pure_alpha_num {
                result.push(block.runes.iter().collect());
                continue;
            }
            match (mode, self.model.as_deref()) {
                (Mode::Crf, Some(model)) => {
                    result.extend(self.decode_crf_block(model, block.runes));
                }
                (Mode::Hybrid, Some(model)) => {
                    result.extend(self.cut_hybrid(model, block.runes));
                }
                // DAG mode, or a CRF mode without a loaded model.
                _ => result.extend(self.cut_dag(block.runes)),
            }
        }
        result
    }

    /// 検索向けの分かち書きを行います。
    ///
    /// [`Segmenter::cut`]の結果に加えて、3文字以上のトークンについて辞書に
    /// 存在する部分文字列を、そのトークンの直前に列挙します。部分文字列は
    /// 開始位置の昇順、同じ開始位置では終了位置の昇順で並びます。ASCII英数字
    /// だけのトークン（`PKU`など）は展開されません。
    ///
    /// 検索エンジンのインデックス構築を想定した出力です。
    ///
    /// # 引数
    ///
    /// * `text` - 入力テキスト
    /// * `mode` - 分割モード
    pub fn cut_search(&self, text: &str, mode: Mode) -> Vec<String> {
        let mut result = vec![];
        for token in self.cut(text, mode) {
            self.add_sub_words(&token, &mut result);
            result.push(token);
        }
        result
    }

    /// トークンに含まれる辞書内の部分文字列を`result`に追加します。
    fn add_sub_words(&self, word: &str, result: &mut Vec<String>) {
        let runes: Vec<char> = word.chars().collect();
        if runes.len() <= 2 {
            return;
        }
        // Alphanumeric tokens are not expanded (PKU must not yield P/K/U).
        if runes.iter().copied().all(is_alpha_num) {
            return;
        }
        for i in 0..runes.len() {
            for j in i + 1..=runes.len() {
                let sub: String = runes[i..j].iter().collect();
                if sub != word && self.dict.contains(&sub) {
                    result.push(sub);
                }
            }
        }
    }

    /// 辞書のDAGに対する最大対数確率の動的計画法でブロックを分割します。
    fn cut_dag(&self, runes: &[char]) -> Vec<String> {
        let n = runes.len();
        if n == 0 {
            return vec![];
        }
        let max_len = self.dict.max_len();

        // dag[i]: end positions (inclusive) of candidate words starting at i,
        // shortest first. The order is part of the tie-break contract.
        let mut dag: Vec<Vec<usize>> = vec![vec![]; n];
        for i in 0..n {
            for j in i..n {
                if j - i + 1 > max_len {
                    break;
                }
                let word: String = runes[i..=j].iter().collect();
                if self.dict.contains(&word) {
                    dag[i].push(j);
                }
            }

            // Extend over a whole alphanumeric run so that inline tokens like
            // "25" or "PKU" are never split inside a Chinese block.
            if is_alpha_num(runes[i]) {
                let mut j = i;
                while j < n && is_alpha_num(runes[j]) {
                    j += 1;
                }
                if !dag[i].contains(&(j - 1)) {
                    dag[i].push(j - 1);
                }
            }

            // At least the single character is a candidate.
            if dag[i].is_empty() {
                dag[i].push(i);
            }
        }

        let mut route = vec![RouteNode { prob: 0.0, end: 0 }; n + 1];
        for i in (0..n).rev() {
            let mut best_prob = f64::NEG_INFINITY;
            let mut best_end = i;
            let mut found = false;
            for &end in &dag[i] {
                let word: String = runes[i..=end].iter().collect();
                let prob = self.dict.log_probability(&word) + route[end + 1].prob;
                if prob > best_prob {
                    best_prob = prob;
                    best_end = end;
                    found = true;
                }
            }
            if !found {
                best_prob = OOV_LOG_PROB + route[i + 1].prob;
                best_end = i;
            }
            route[i] = RouteNode {
                prob: best_prob,
                end: best_end,
            };
        }

        let mut result = vec![];
        let mut idx = 0;
        while idx < n {
            let end = route[idx].end;
            result.push(runes[idx..=end].iter().collect());
            idx = end + 1;
        }
        result
    }

    /// 辞書優先のハイブリッド分割を行います。
    ///
    /// DAG分割の結果のうち複数文字のトークンは辞書ヒットとして信頼し、
    /// 1文字のトークンの連なりは未知語の候補としてバッファに溜め、
    /// まとめてCRFに復号させます。
    fn cut_hybrid(&self, model: &Model, runes: &[char]) -> Vec<String> {
        let mut result = vec![];
        let mut buf: Vec<char> = vec![];

        for token in self.cut_dag(runes) {
            if token.chars().count() > 1 {
                // Trusted dictionary hit.
                if !buf.is_empty() {
                    result.extend(self.decode_crf_block(model, &buf));
                    buf.clear();
                }
                result.push(token);
            } else {
                buf.extend(token.chars());
            }
        }
        if !buf.is_empty() {
            result.extend(self.decode_crf_block(model, &buf));
        }
        result
    }

    /// CRFのタグ列からトークンを組み立てます。
    ///
    /// `B`でバッファを張り直し、`M`は追記、`E`で確定します。`S`では
    /// 溜まっているバッファを1回だけ出力してから、1文字をトークンとして
    /// 出力します。末尾に残ったバッファはそのまま出力されます。
    fn decode_crf_block(&self, model: &Model, runes: &[char]) -> Vec<String> {
        if runes.is_empty() {
            return vec![];
        }
        let tags = model.decode(runes);
        let mut result = vec![];
        let mut buf = String::new();
        for (&tag, &c) in tags.iter().zip(runes) {
            match tag {
                Tag::B => {
                    if !buf.is_empty() {
                        result.push(std::mem::take(&mut buf));
                    }
                    buf.push(c);
                }
                Tag::M => buf.push(c),
                Tag::E => {
                    buf.push(c);
                    result.push(std::mem::take(&mut buf));
                }
                Tag::S => {
                    if !buf.is_empty() {
                        result.push(std::mem::take(&mut buf));
                    }
                    result.push(c.to_string());
                }
            }
        }
        if !buf.is_empty() {
            result.push(buf);
        }
        result
    }
}
