//! Viterbiアルゴリズムによる復号
//!
//! 文字列に対して最大スコアのタグ列を求めます。スコアは正規化しない実数の
//! 加算で、開始・終了状態の遷移コストは持ちません。同点の場合はタグ順
//! （B, M, E, S）で先に現れた候補が選ばれ、復号は実行間で決定的です。

use crate::crf::features::{extract_features, NUM_FEATURES};
use crate::crf::{Model, Tag};

impl Model {
    /// 文字列を復号して、各文字へのタグ列を返します。
    ///
    /// # 引数
    ///
    /// * `runes` - 入力の文字列（文字単位）
    ///
    /// # 戻り値
    ///
    /// 入力と同じ長さのタグ列。空の入力には空のタグ列を返します。
    pub fn decode(&self, runes: &[char]) -> Vec<Tag> {
        let n = runes.len();
        if n == 0 {
            return vec![];
        }

        // dp[i][tag]: max score of a tag path ending at position i with tag
        let mut dp = vec![[0.0; Tag::COUNT]; n];
        // path[i][tag]: the previous tag achieving dp[i][tag]
        let mut path = vec![[Tag::B; Tag::COUNT]; n];

        // Initialization: no start-state transition cost.
        let feats = extract_features(runes, 0);
        for tag in Tag::ALL {
            dp[0][tag.index()] = self.emission_score(&feats, tag);
        }

        for i in 1..n {
            let feats = extract_features(runes, i);
            for curr in Tag::ALL {
                let emission = self.emission_score(&feats, curr);
                let mut best_score = f64::NEG_INFINITY;
                let mut best_prev = Tag::B;
                for prev in Tag::ALL {
                    let score = dp[i - 1][prev.index()] + self.transition(prev, curr);
                    if score > best_score {
                        best_score = score;
                        best_prev = prev;
                    }
                }
                dp[i][curr.index()] = best_score + emission;
                path[i][curr.index()] = best_prev;
            }
        }

        // Termination: no stop-state cost.
        let mut best_score = f64::NEG_INFINITY;
        let mut best_tag = Tag::B;
        for tag in Tag::ALL {
            if dp[n - 1][tag.index()] > best_score {
                best_score = dp[n - 1][tag.index()];
                best_tag = tag;
            }
        }

        let mut tags = vec![Tag::B; n];
        tags[n - 1] = best_tag;
        for i in (1..n).rev() {
            tags[i - 1] = path[i][tags[i].index()];
        }
        tags
    }

    /// 位置の素性集合に対するタグの放出スコアを計算します。
    ///
    /// 保存されていない素性・タグの組は0として扱われます。
    fn emission_score(&self, feats: &[String; NUM_FEATURES], tag: Tag) -> f64 {
        feats.iter().map(|feat| self.emission(feat, tag)).sum()
    }
}
