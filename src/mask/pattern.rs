//! Plain pattern masking
//!
//! A pattern mixes placeholder tokens with literal characters:
//!
//! - `9` takes an ASCII digit
//! - `A` takes an ASCII letter
//! - `S` takes an ASCII letter or digit
//!
//! Anything else in the pattern is a literal that is copied to the output.

const DIGIT: char = '9';
const ALPHA: char = 'A';
const ALPHANUM: char = 'S';

/// Characters that survive input stripping (`[A-Za-z0-9_]`)
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns `None` for literals, otherwise whether `c` fits the placeholder
fn slot_accepts(slot: char, c: char) -> Option<bool> {
    match slot {
        DIGIT => Some(c.is_ascii_digit()),
        ALPHA => Some(c.is_ascii_alphabetic()),
        ALPHANUM => Some(c.is_ascii_alphanumeric()),
        _ => None,
    }
}

/// Whether a pattern character is a placeholder token
pub fn is_placeholder(slot: char) -> bool {
    slot_accepts(slot, '0').is_some()
}

/// Apply `pattern` to `raw`, left to right.
///
/// Input that does not fit the next placeholder drops the rest of the input.
/// Output ends at the last consumed input character, except that literals
/// trailing the last word position of the pattern are appended once reached.
pub fn to_pattern(raw: &str, pattern: &str) -> String {
    let values: Vec<char> = raw.chars().filter(|c| is_word(*c)).collect();
    let slots: Vec<char> = pattern.chars().collect();

    let mut output = String::with_capacity(pattern.len());
    let mut filled_len = 0;
    let mut index = 0;

    for (position, &slot) in slots.iter().enumerate() {
        let Some(&next) = values.get(index) else {
            if slots[position..].iter().all(|c| !is_word(*c)) {
                output.extend(&slots[position..]);
            }
            return output;
        };

        match slot_accepts(slot, next) {
            Some(true) => {
                output.push(next);
                index += 1;
                filled_len = output.len();
            }
            Some(false) => {
                output.truncate(filled_len);
                return output;
            }
            None => {
                output.push(slot);
                // typed literal
                if slot == next {
                    index += 1;
                    filled_len = output.len();
                }
            }
        }
    }

    output
}
