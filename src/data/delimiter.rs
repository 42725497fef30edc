use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};

use super::model::{Delimiter, DelimiterGuess};

// ---------------------------------------------------------------------------
// Content sniffing
// ---------------------------------------------------------------------------

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// The per-line count shared by every sample, if it is the same everywhere
/// and non-zero.
fn uniform_count(counts: &[usize]) -> Option<usize> {
    let first = *counts.first()?;
    (first > 0 && counts.iter().all(|&c| c == first)).then_some(first)
}

/// Guess the field delimiter from the first `config.sample_lines` non-blank
/// lines and the file name.
///
/// * A delimiter qualifies when it appears the same, non-zero number of times
///   on every sampled line.
/// * If only one qualifies it wins; if both do, the larger count wins and a
///   tie goes to comma.
/// * If neither does, the file name decides (`Fallback`).
/// * No non-blank line at all gives `Undetermined`.
pub fn detect_delimiter<I, S>(lines: I, filename: &str, config: &LoaderConfig) -> DelimiterGuess
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tabs = Vec::new();
    let mut commas = Vec::new();
    for line in lines
        .into_iter()
        .filter(|l| !is_blank(l.as_ref()))
        .take(config.sample_lines)
    {
        let line = line.as_ref();
        tabs.push(line.matches('\t').count());
        commas.push(line.matches(',').count());
    }

    if tabs.is_empty() {
        return DelimiterGuess::Undetermined;
    }

    match (uniform_count(&tabs), uniform_count(&commas)) {
        (None, None) => extension_fallback(filename, config),
        (Some(_), None) => DelimiterGuess::Detected(Delimiter::Tab),
        (None, Some(_)) => DelimiterGuess::Detected(Delimiter::Comma),
        (Some(tab), Some(comma)) if tab > comma => DelimiterGuess::Detected(Delimiter::Tab),
        (Some(_), Some(_)) => DelimiterGuess::Detected(Delimiter::Comma),
    }
}

fn extension_fallback(filename: &str, config: &LoaderConfig) -> DelimiterGuess {
    let is_tab = config
        .tab_suffixes
        .iter()
        .any(|suffix| filename.ends_with(suffix.as_str()));
    if is_tab {
        return DelimiterGuess::Fallback(Delimiter::Tab);
    }
    match config.fallback_delimiter {
        Some(d) => DelimiterGuess::Fallback(d),
        None => DelimiterGuess::Undetermined,
    }
}

// ---------------------------------------------------------------------------
// File-level entry point
// ---------------------------------------------------------------------------

/// Outcome of sniffing a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniffed {
    pub delimiter: Delimiter,
    /// True when content was inconclusive and the file name decided.
    pub from_extension: bool,
}

/// Collect up to `limit` non-blank lines. `\n`, `\r\n` and a bare `\r` all
/// end a line, as they do for the `csv` reader.
fn sample_lines<R: BufRead>(mut reader: R, limit: usize) -> io::Result<Vec<String>> {
    let mut sample = Vec::with_capacity(limit);
    let mut buf = Vec::new();
    while sample.len() < limit {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let chunk = std::str::from_utf8(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        for line in chunk.trim_end_matches('\n').split('\r') {
            if sample.len() >= limit {
                break;
            }
            if !is_blank(line) {
                sample.push(line.to_string());
            }
        }
    }
    Ok(sample)
}

/// Sniff the delimiter of the file at `path`, reading only as many lines as
/// the sample needs.
pub fn sniff_file(path: &Path, config: &LoaderConfig) -> Result<Sniffed> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let sample = sample_lines(BufReader::new(file), config.sample_lines)
        .map_err(|e| LoadError::io(path, e))?;

    if sample.is_empty() {
        return Err(LoadError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let filename = path.to_string_lossy();
    let guess = detect_delimiter(&sample, &filename, config);
    log::debug!("Sniffed {} -> {guess:?}", path.display());

    match guess {
        DelimiterGuess::Detected(delimiter) => Ok(Sniffed {
            delimiter,
            from_extension: false,
        }),
        DelimiterGuess::Fallback(delimiter) => Ok(Sniffed {
            delimiter,
            from_extension: true,
        }),
        DelimiterGuess::Undetermined => Err(LoadError::UndeterminedDelimiter {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(lines: &[&str], filename: &str) -> DelimiterGuess {
        detect_delimiter(lines, filename, &LoaderConfig::default())
    }

    #[test]
    fn uniform_comma_is_detected() {
        let lines = ["time,value", "1,10", "2,x", "3,30"];
        assert_eq!(detect(&lines, "a.txt"), DelimiterGuess::Detected(Delimiter::Comma));
    }

    #[test]
    fn uniform_tab_is_detected() {
        let lines = ["a\tb\tc", "1\t2\t3"];
        assert_eq!(detect(&lines, "a.csv"), DelimiterGuess::Detected(Delimiter::Tab));
    }

    #[test]
    fn larger_common_count_wins() {
        // tab 2, comma 1 on every line
        let lines = ["a\tb,c\td", "1\t2,3\t4"];
        assert_eq!(detect(&lines, "x.csv"), DelimiterGuess::Detected(Delimiter::Tab));

        // tab 1, comma 2
        let lines = ["a,b\tc,d", "1,2\t3,4"];
        assert_eq!(detect(&lines, "x.txt"), DelimiterGuess::Detected(Delimiter::Comma));
    }

    #[test]
    fn tie_goes_to_comma() {
        let lines = ["a,b\tc", "1,2\t3", "4,5\t6"];
        assert_eq!(detect(&lines, "x.txt"), DelimiterGuess::Detected(Delimiter::Comma));
    }

    #[test]
    fn inconsistent_counts_fall_back_to_extension() {
        let lines = ["a,b,c", "1,2", "x\ty"];
        assert_eq!(detect(&lines, "data.txt"), DelimiterGuess::Fallback(Delimiter::Tab));
        assert_eq!(detect(&lines, "data.xlm"), DelimiterGuess::Fallback(Delimiter::Tab));
        assert_eq!(detect(&lines, "data.csv"), DelimiterGuess::Fallback(Delimiter::Comma));
        assert_eq!(detect(&lines, "data"), DelimiterGuess::Fallback(Delimiter::Comma));
    }

    #[test]
    fn zero_counts_fall_back_to_extension() {
        let lines = ["single", "1", "2"];
        assert_eq!(detect(&lines, "one.txt"), DelimiterGuess::Fallback(Delimiter::Tab));
        assert_eq!(detect(&lines, "one.dat"), DelimiterGuess::Fallback(Delimiter::Comma));
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let lines = ["single", "1"];
        assert_eq!(detect(&lines, "ONE.TXT"), DelimiterGuess::Fallback(Delimiter::Comma));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let lines = ["", "a,b", "   ", "\t", "1,2", ""];
        assert_eq!(detect(&lines, "f.dat"), DelimiterGuess::Detected(Delimiter::Comma));
    }

    #[test]
    fn only_first_ten_non_blank_lines_are_sampled() {
        let mut lines: Vec<String> = (0..10).map(|i| format!("{i},{i}")).collect();
        lines.insert(3, String::new());
        lines.push("no delimiter here".to_string());
        let config = LoaderConfig::default();
        assert_eq!(
            detect_delimiter(&lines, "f.txt", &config),
            DelimiterGuess::Detected(Delimiter::Comma)
        );

        lines.insert(5, "broken".to_string());
        assert_eq!(
            detect_delimiter(&lines, "f.txt", &config),
            DelimiterGuess::Fallback(Delimiter::Tab)
        );
    }

    #[test]
    fn empty_sample_is_undetermined() {
        assert_eq!(detect(&[], "f.csv"), DelimiterGuess::Undetermined);
        assert_eq!(detect(&["", "  ", "\t"], "f.txt"), DelimiterGuess::Undetermined);
    }

    #[test]
    fn strict_config_leaves_unknown_extension_undetermined() {
        let config = LoaderConfig {
            fallback_delimiter: None,
            ..LoaderConfig::default()
        };
        let lines = ["a", "b"];
        assert_eq!(detect_delimiter(lines, "f.csv", &config), DelimiterGuess::Undetermined);
        assert_eq!(
            detect_delimiter(lines, "f.txt", &config),
            DelimiterGuess::Fallback(Delimiter::Tab)
        );
    }

    #[test]
    fn any_line_ending_splits_the_sample() {
        let text = "a,b\r1,2\r\n\r\n3,4\n  \rlast";
        let lines = sample_lines(text.as_bytes(), 10).unwrap();
        assert_eq!(lines, vec!["a,b", "1,2", "3,4", "last"]);

        let lines = sample_lines(text.as_bytes(), 2).unwrap();
        assert_eq!(lines, vec!["a,b", "1,2"]);
    }

    #[test]
    fn bare_carriage_return_file_is_sampled_per_line() {
        // As one long line the comma count would look uniform.
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"a,b\r1,2\r3\r").unwrap();

        let sniffed = sniff_file(file.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(
            sniffed,
            Sniffed {
                delimiter: Delimiter::Comma,
                from_extension: true
            }
        );
    }

    #[test]
    fn detection_is_pure() {
        let lines = ["a\tb", "1\t2"];
        let first = detect(&lines, "f.csv");
        let second = detect(&lines, "f.csv");
        assert_eq!(first, second);
    }
}
