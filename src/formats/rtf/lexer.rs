//! RTF tokenizer
//!
//! Splits raw RTF into braces, control words, and literal text. Character
//! escapes (`\\`, `\{`, `\}`, `\'hh`, `\uN`) are resolved here so the parser
//! only ever sees decoded text.

/// A lexed RTF token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    OpenBrace,
    CloseBrace,
    Control(ControlWord),
    Text(String),
}

/// Control words the parser cares about. Everything else lexes to
/// `Unknown` and is skipped downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlWord {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Par,
    Line,
    Tab,
    Cell,
    Row,
    TableRowDefaults,
    InTable,
    Font(i32),
    FontTable,
    ColorTable,
    Stylesheet,
    Info,
    IgnorableDestination,
    Unknown(String),
}

/// Tokenize an RTF string.
///
/// Never fails: unrecognized escapes and stray backslashes at end of input
/// are dropped rather than reported.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut text = String::new();
    // \uN emits UTF-16 units; buffer them so surrogate pairs decode whole.
    let mut pending_utf16: Vec<u16> = Vec::new();

    macro_rules! flush_text {
        () => {
            if !pending_utf16.is_empty() {
                text.push_str(&String::from_utf16_lossy(&pending_utf16));
                pending_utf16.clear();
            }
            if !text.is_empty() {
                tokens.push(Token::Text(std::mem::take(&mut text)));
            }
        };
    }

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                flush_text!();
                tokens.push(Token::OpenBrace);
            }
            '}' => {
                flush_text!();
                tokens.push(Token::CloseBrace);
            }
            '\\' => {
                let next = match chars.peek().copied() {
                    Some(c) => c,
                    None => break,
                };
                match next {
                    '\\' | '{' | '}' => {
                        chars.next();
                        if !pending_utf16.is_empty() {
                            text.push_str(&String::from_utf16_lossy(&pending_utf16));
                            pending_utf16.clear();
                        }
                        text.push(next);
                    }
                    '~' => {
                        chars.next();
                        if !pending_utf16.is_empty() {
                            text.push_str(&String::from_utf16_lossy(&pending_utf16));
                            pending_utf16.clear();
                        }
                        text.push('\u{a0}');
                    }
                    '-' | '_' => {
                        // Optional/non-breaking hyphen markers carry no text.
                        chars.next();
                    }
                    '*' => {
                        chars.next();
                        flush_text!();
                        tokens.push(Token::Control(ControlWord::IgnorableDestination));
                    }
                    '\'' => {
                        chars.next();
                        let hi = chars.next();
                        let lo = chars.next();
                        if let (Some(hi), Some(lo)) = (hi, lo) {
                            let hex: String = [hi, lo].iter().collect();
                            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                                if !pending_utf16.is_empty() {
                                    text.push_str(&String::from_utf16_lossy(&pending_utf16));
                                    pending_utf16.clear();
                                }
                                // RTF \ansi text is effectively Latin-1 here.
                                text.push(char::from(byte));
                            }
                        }
                    }
                    c if c.is_ascii_alphabetic() => {
                        let (word, param) = lex_control_word(&mut chars);
                        if word == "u" {
                            // \uN is a 16-bit signed code unit followed by a
                            // fallback character which must be skipped.
                            let unit = param.unwrap_or(0) as i16 as u16;
                            pending_utf16.push(unit);
                            if chars.peek() == Some(&'?') {
                                chars.next();
                            }
                        } else {
                            flush_text!();
                            tokens.push(Token::Control(map_control_word(&word, param)));
                        }
                    }
                    _ => {
                        // Unknown escape, drop the backslash.
                        chars.next();
                    }
                }
            }
            '\r' | '\n' => {
                // Raw line endings in RTF are not content.
            }
            _ => {
                if !pending_utf16.is_empty() {
                    text.push_str(&String::from_utf16_lossy(&pending_utf16));
                    pending_utf16.clear();
                }
                text.push(ch);
            }
        }
    }

    flush_text!();
    tokens
}

/// Lex the letters and optional numeric parameter of a control word,
/// consuming the single delimiting space if present.
fn lex_control_word(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> (String, Option<i32>) {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }

    let mut param = String::new();
    if chars.peek() == Some(&'-') {
        param.push('-');
        chars.next();
    }
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            param.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if chars.peek() == Some(&' ') {
        chars.next();
    }

    let param = if param.is_empty() || param == "-" {
        None
    } else {
        param.parse().ok()
    };
    (word, param)
}

fn map_control_word(word: &str, param: Option<i32>) -> ControlWord {
    // A toggle with parameter 0 turns the property off, anything else on.
    let on = param != Some(0);
    match word {
        "b" => ControlWord::Bold(on),
        "i" => ControlWord::Italic(on),
        "ul" => ControlWord::Underline(on),
        "ulnone" => ControlWord::Underline(false),
        "par" => ControlWord::Par,
        "line" => ControlWord::Line,
        "tab" => ControlWord::Tab,
        "cell" => ControlWord::Cell,
        "row" => ControlWord::Row,
        "trowd" => ControlWord::TableRowDefaults,
        "intbl" => ControlWord::InTable,
        "f" => ControlWord::Font(param.unwrap_or(0)),
        "fonttbl" => ControlWord::FontTable,
        "colortbl" => ControlWord::ColorTable,
        "stylesheet" => ControlWord::Stylesheet,
        "info" => ControlWord::Info,
        _ => ControlWord::Unknown(word.to_string()),
    }
}
