//! 構造化パーセプトロンによるモデル学習のためのモジュール。
//!
//! このモジュールは、正解タグ付きの文の集合から、CRFモデルの重みを
//! 構造化パーセプトロンで学習する機能を提供します。各文について現在の
//! モデルでタグ列を予測し、正解と一致しなければ
//! `w ← w + φ(gold) − φ(pred)` の規則で放出重みと遷移重みを更新します。
//! 平均化・学習率・正則化は行いません。
//!
//! 学習は決定的です。文は与えられた順に処理され、各位置の素性は
//! テンプレート順（`U00..U04`）に列挙されます。
//!
//! # 使用例
//!
//! ```
//! use zhseg::trainer::{Corpus, Trainer};
//!
//! let corpus = Corpus::from_reader("我 爱 北京\n南京市 长江大桥\n".as_bytes())?;
//! let result = Trainer::new().max_iter(10).train(&corpus);
//!
//! let last = result.history.last().unwrap();
//! assert_eq!(last.total, 2);
//! // 小さなコーパスはすぐに完全に学習されます。
//! assert_eq!(last.correct, 2);
//! # Ok::<(), zhseg::errors::ZhsegError>(())
//! ```

mod corpus;

pub use crate::crf::Model;
use crate::crf::features::extract_features;
pub use crate::trainer::corpus::{Corpus, Sentence};

/// 既定の反復回数。
const DEFAULT_MAX_ITER: u64 = 5;

/// 1回の反復の統計。
#[derive(Clone, Copy, Debug)]
pub struct IterationStats {
    /// 予測が正解と完全一致した文の数
    pub correct: usize,
    /// 処理した文の数
    pub total: usize,
}

impl IterationStats {
    /// 文単位の完全一致率を返します。
    ///
    /// 文が1つもない場合は0.0を返します。
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// 学習の結果。
pub struct TrainResult {
    /// 学習されたモデル
    pub model: Model,
    /// 反復ごとの統計（反復順）
    pub history: Vec<IterationStats>,
}

/// CRFモデルのトレーナー。
///
/// 構造化パーセプトロンアルゴリズムを使用して、空のモデルから重みを学習します。
/// 学習中のモデルを並行して復号に使ってはいけません。
pub struct Trainer {
    max_iter: u64,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Trainer {
    /// 新しいトレーナーを作成します。
    pub fn new() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// 反復回数を変更します。
    ///
    /// デフォルト値は5です。
    ///
    /// # 引数
    ///
    /// * `max_iter` - 反復回数（1以上）
    ///
    /// # 戻り値
    ///
    /// 設定が更新されたトレーナー
    ///
    /// # パニック
    ///
    /// 値が0の場合、パニックします。
    pub fn max_iter(mut self, max_iter: u64) -> Self {
        assert!(max_iter > 0);
        self.max_iter = max_iter;
        self
    }

    /// 空のモデルから学習を実行します。
    ///
    /// # 引数
    ///
    /// * `sentences` - 学習文の集合
    ///
    /// # 戻り値
    ///
    /// 学習されたモデルと反復ごとの統計
    pub fn train(&self, sentences: &[Sentence]) -> TrainResult {
        let mut model = Model::new();
        let mut history = Vec::with_capacity(self.max_iter as usize);
        for _ in 0..self.max_iter {
            history.push(Self::run_iteration(&mut model, sentences));
        }
        TrainResult { model, history }
    }

    /// 全文に対する1回の学習パスを実行します。
    ///
    /// 各文について予測と正解を比較し、不一致の文に対してパーセプトロン更新を
    /// 適用します。放出重みは、タグが食い違う位置の各素性に対して正解タグへ+1、
    /// 予測タグへ−1。遷移重みは、2文字目以降でタグの組が食い違う位置に対して
    /// 正解の組へ+1、予測の組へ−1です。先頭の位置は遷移更新に寄与しません。
    ///
    /// # 引数
    ///
    /// * `model` - 更新されるモデル
    /// * `sentences` - 学習文の集合
    ///
    /// # 戻り値
    ///
    /// このパスの統計
    pub fn run_iteration(model: &mut Model, sentences: &[Sentence]) -> IterationStats {
        let mut correct = 0;
        let mut total = 0;

        for sentence in sentences {
            let runes = sentence.runes();
            let gold = sentence.tags();

            let pred = model.decode(runes);
            if pred.len() != gold.len() {
                // Cannot happen for sentences built by the assembler.
                continue;
            }

            total += 1;
            if pred == gold {
                correct += 1;
                continue;
            }

            for (i, (&g, &p)) in gold.iter().zip(&pred).enumerate() {
                if g == p {
                    continue;
                }
                for feat in extract_features(runes, i) {
                    model.update_emission(&feat, g, 1.0);
                    model.update_emission(&feat, p, -1.0);
                }
            }

            for i in 1..gold.len() {
                let gold_pair = (gold[i - 1], gold[i]);
                let pred_pair = (pred[i - 1], pred[i]);
                if gold_pair != pred_pair {
                    model.update_transition(gold_pair.0, gold_pair.1, 1.0);
                    model.update_transition(pred_pair.0, pred_pair.1, -1.0);
                }
            }
        }

        IterationStats { correct, total }
    }
}
