//! 素性抽出
//!
//! 各文字位置に対して、前後2文字の窓にわたる5つのユニグラム素性を生成します。
//! テンプレートは`U00..U04`の固定順で、バイグラム素性は使用しません。

/// 窓が系列の外に出た位置を表す番兵文字列。
pub const BOUNDARY_MARKER: &str = "_BOS_";

/// 1位置あたりの素性数。
pub const NUM_FEATURES: usize = 5;

/// 位置`idx`の素性文字列を生成します。
///
/// 素性は「テンプレート名 + `:` + 1文字」の形で、以下の固定順で返されます。
///
/// ```text
/// U00:x[i-2]  U01:x[i-1]  U02:x[i]  U03:x[i+1]  U04:x[i+2]
/// ```
///
/// 系列の範囲外となる位置には文字の代わりに[`BOUNDARY_MARKER`]が入ります。
///
/// # 引数
///
/// * `runes` - 入力の文字列（文字単位）
/// * `idx` - 素性を生成する位置
///
/// # 戻り値
///
/// テンプレート順に並んだ5つの素性文字列
pub fn extract_features(runes: &[char], idx: usize) -> [String; NUM_FEATURES] {
    [
        feature("U00", char_at(runes, idx, -2)),
        feature("U01", char_at(runes, idx, -1)),
        feature("U02", char_at(runes, idx, 0)),
        feature("U03", char_at(runes, idx, 1)),
        feature("U04", char_at(runes, idx, 2)),
    ]
}

fn char_at(runes: &[char], idx: usize, offset: isize) -> Option<char> {
    let pos = idx as isize + offset;
    if pos < 0 || pos >= runes.len() as isize {
        None
    } else {
        Some(runes[pos as usize])
    }
}

fn feature(template: &str, c: Option<char>) -> String {
    match c {
        Some(c) => format!("{}:{}", template, c),
        None => format!("{}:{}", template, BOUNDARY_MARKER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_middle() {
        let runes: Vec<char> = "南京市长江".chars().collect();
        let feats = extract_features(&runes, 2);
        assert_eq!(
            ["U00:南", "U01:京", "U02:市", "U03:长", "U04:江"],
            feats
        );
    }

    #[test]
    fn test_extract_boundaries() {
        let runes: Vec<char> = "大桥".chars().collect();
        assert_eq!(
            ["U00:_BOS_", "U01:_BOS_", "U02:大", "U03:桥", "U04:_BOS_"],
            extract_features(&runes, 0)
        );
        assert_eq!(
            ["U00:_BOS_", "U01:大", "U02:桥", "U03:_BOS_", "U04:_BOS_"],
            extract_features(&runes, 1)
        );
    }

    #[test]
    fn test_extract_single_char() {
        let runes: Vec<char> = "中".chars().collect();
        let feats = extract_features(&runes, 0);
        assert_eq!(NUM_FEATURES, feats.len());
        assert_eq!("U02:中", feats[2]);
        assert_eq!("U04:_BOS_", feats[4]);
    }
}
