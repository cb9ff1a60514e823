//! 線形連鎖CRFによるタグ付け
//!
//! このモジュールは、B/M/E/Sの4タグによる単語分割用の線形連鎖CRFを提供します。
//! モデルは遷移重み行列と疎な素性重みテーブルから成り、Viterbiアルゴリズムで
//! 最良のタグ列を復号します。重みは構造化パーセプトロン
//! （[`Trainer`](crate::trainer::Trainer)）で学習します。

mod decoder;
pub mod features;
mod model;

use std::fmt;
use std::str::FromStr;

use crate::errors::ZhsegError;

pub use crate::crf::model::Model;

/// 単語分割用のタグ。
///
/// 単語の先頭（B）、中間（M）、末尾（E）、および1文字語（S）を表します。
/// タグの集合はこの4つで閉じており、範囲外のタグは型として表現できません。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// 単語の先頭文字
    B = 0,
    /// 単語の中間文字
    M = 1,
    /// 単語の末尾文字
    E = 2,
    /// 1文字からなる単語
    S = 3,
}

impl Tag {
    /// タグの種類数
    pub const COUNT: usize = 4;

    /// 全タグの固定順の列挙。
    ///
    /// Viterbiの同点解消と学習の決定性は、この順序での走査に依存します。
    pub const ALL: [Self; Self::COUNT] = [Self::B, Self::M, Self::E, Self::S];

    /// タグの添字（0..=3）を返します。
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 添字からタグを復元します。
    ///
    /// # 戻り値
    ///
    /// 添字が0..=3であれば対応するタグ、それ以外は`None`
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::B),
            1 => Some(Self::M),
            2 => Some(Self::E),
            3 => Some(Self::S),
            _ => None,
        }
    }

    /// タグの文字列表現（`B`/`M`/`E`/`S`）を返します。
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::M => "M",
            Self::E => "E",
            Self::S => "S",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = ZhsegError;

    /// 文字列からタグをパースします。
    ///
    /// `B`/`M`/`E`/`S`以外の入力はエラーになります。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Self::B),
            "M" => Ok(Self::M),
            "E" => Ok(Self::E),
            "S" => Ok(Self::S),
            _ => Err(ZhsegError::invalid_argument(
                "tag",
                format!("tag must be one of B/M/E/S: {}", s),
            )),
        }
    }
}
