// トラックヘッダースキャナー
//
// ファイル内容から `--track` で始まるヘッダー行を文書順に検出し、
// ヘッダー間のSQL本文に分割します。ここでは寛容に検出し、
// 文法の検証は track_header_parser で行います。

use regex::Regex;
use std::sync::LazyLock;

static TRACK_HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ *--track.*$").expect("track header pattern is valid"));

/// 検出されたヘッダー行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// 行番号（1始まり）
    pub line: usize,
    /// 改行を含まないヘッダー行
    pub text: &'a str,
}

/// スキャン結果
///
/// `bodies[0]` は最初のヘッダーより前の内容、`bodies[i + 1]` は `headers[i]` に続く本文です。
/// ヘッダーが無い場合、`bodies` は内容全体の1要素のみとなります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackScan<'a> {
    pub bodies: Vec<&'a str>,
    pub headers: Vec<HeaderLine<'a>>,
}

impl<'a> TrackScan<'a> {
    /// トラック形式のファイルかどうか
    pub fn is_track_file(&self) -> bool {
        !self.headers.is_empty()
    }

    /// 最初のヘッダーより前の内容
    pub fn preamble(&self) -> &'a str {
        self.bodies.first().copied().unwrap_or_default()
    }

    /// ヘッダーと対応する本文の組を文書順に返す
    pub fn tracks(&self) -> impl Iterator<Item = (HeaderLine<'a>, &'a str)> + '_ {
        self.headers
            .iter()
            .copied()
            .zip(self.bodies.iter().skip(1).copied())
    }
}

/// 内容をヘッダー行と本文に分割する
///
/// ヘッダー行を終端する改行は本文に含めません。
/// ファイル末尾のヘッダーに対応する本文は空文字列になります。
pub fn scan(content: &str) -> TrackScan<'_> {
    let mut bodies = Vec::new();
    let mut headers = Vec::new();
    let mut body_start = 0;
    let mut line = 1;
    let mut counted_until = 0;

    for found in TRACK_HEADER_PATTERN.find_iter(content) {
        bodies.push(&content[body_start..found.start()]);

        line += content[counted_until..found.start()].matches('\n').count();
        counted_until = found.start();
        headers.push(HeaderLine {
            line,
            text: found.as_str(),
        });

        body_start = if content[found.end()..].starts_with('\n') {
            found.end() + 1
        } else {
            found.end()
        };
    }

    bodies.push(&content[body_start..]);

    TrackScan { bodies, headers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_without_headers() {
        let result = scan("CREATE TABLE t (id INT);\n-- a comment\n");
        assert!(!result.is_track_file());
        assert_eq!(result.bodies, vec!["CREATE TABLE t (id INT);\n-- a comment\n"]);
    }

    #[test]
    fn test_scan_pairs_headers_with_bodies() {
        let content = "--track:01 (v)\nCREATE TABLE a;\n--track:02 (r)\nCREATE VIEW b;\n";
        let result = scan(content);

        let tracks: Vec<_> = result.tracks().collect();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].0.text, "--track:01 (v)");
        assert_eq!(tracks[0].0.line, 1);
        assert_eq!(tracks[0].1, "CREATE TABLE a;\n");
        assert_eq!(tracks[1].0.text, "--track:02 (r)");
        assert_eq!(tracks[1].0.line, 3);
        assert_eq!(tracks[1].1, "CREATE VIEW b;\n");
    }

    #[test]
    fn test_scan_header_at_eof_has_empty_body() {
        let result = scan("--track:01 (r)\n--track:02 (r)");
        let bodies: Vec<_> = result.tracks().map(|(_, body)| body).collect();
        assert_eq!(bodies, vec!["", ""]);
    }

    #[test]
    fn test_scan_keeps_preamble_separate() {
        let result = scan("-- preamble\n  --track:01 (v)\nSELECT 1;\n");
        assert_eq!(result.preamble(), "-- preamble\n");
        assert_eq!(result.headers[0].text, "  --track:01 (v)");
        assert_eq!(result.headers[0].line, 2);
    }

    #[test]
    fn test_scan_is_permissive() {
        let content = "--track\n--track:\n-track:02 (r)\n---track: 02 (r)\n --track: 02 (r)\n";
        let result = scan(content);
        let texts: Vec<_> = result.headers.iter().map(|h| h.text).collect();
        assert_eq!(texts, vec!["--track", "--track:", " --track: 02 (r)"]);
        assert_eq!(result.headers[2].line, 5);
    }
}
