/// Field delimiter of the source format.
pub const DELIMITER: char = ',';

/// Drop all whitespace from `line` and split it on commas.
///
/// An empty line yields a single empty token, which the encoder treats as blank.
pub fn tokenize(line: &str) -> Vec<String> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.split(DELIMITER).map(str::to_string).collect()
}
