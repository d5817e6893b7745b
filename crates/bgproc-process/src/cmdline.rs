//! Windows command-line quoting.
//!
//! Arguments follow the `CommandLineToArgvW` rules, and anything `cmd`
//! treats as an operator is kept inside double quotes.

/// Characters that force an argument into double quotes.
const QUOTE_TRIGGERS: &[char] = &[' ', '\t', '"', '&', '|', '<', '>', '^', '(', ')'];

/// Quotes one argument for a `cmd /C start` command line. Plain arguments
/// pass through unchanged.
pub fn quote_argument(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(QUOTE_TRIGGERS) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');

    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.extend(std::iter::repeat('\\').take(backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }

    // Backslashes before the closing quote must not escape it.
    quoted.extend(std::iter::repeat('\\').take(backslashes * 2));
    quoted.push('"');
    quoted
}
