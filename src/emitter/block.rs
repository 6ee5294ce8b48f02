use super::config::EmitterConfig;
use super::format::format_coord;

/// A single word in a command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Word {
    /// Verbatim token: motion codes, mode codes, end-of-program.
    Token(String),
    /// Axis word: letter paired with a coordinate value.
    Axis(char, f64),
    /// Feed word: rendered with the configured feed letter.
    Feed(f64),
}

/// A single command line, holding words in canonical order and an optional
/// trailing comment.
pub struct Block {
    words: Vec<Word>,
    comment: Option<String>,
}

impl Block {
    /// `true` when the block holds neither words nor a comment. The emitter
    /// skips such blocks entirely — a fully-suppressed move produces no
    /// output line.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.comment.is_none()
    }

    /// Renders the block to one command line, including the configured EOL.
    /// An empty block renders to an empty string.
    pub fn render(&self, cfg: &EmitterConfig) -> String {
        if self.is_empty() {
            return String::new();
        }

        let sep = &cfg.format.word_separator;
        let mut line = String::new();
        let mut needs_sep = false;

        for word in &self.words {
            if needs_sep {
                line.push_str(sep);
            }
            line.push_str(&render_word(word, cfg));
            needs_sep = true;
        }

        if let Some(text) = &self.comment {
            if needs_sep {
                line.push_str(sep);
            }
            line.push_str(&cfg.program.comment_open);
            line.push_str(text);
            line.push_str(&cfg.program.comment_close);
        }

        line.push_str(&cfg.format.eol);
        line
    }
}

fn render_word(word: &Word, cfg: &EmitterConfig) -> String {
    let strip = !cfg.format.trailing_zeros;
    match word {
        Word::Token(s) => s.clone(),
        Word::Axis(letter, v) => format!(
            "{letter}{}",
            format_coord(*v, cfg.format.decimal_places, strip)
        ),
        Word::Feed(v) => format!(
            "{}{}",
            cfg.words.feed,
            format_coord(*v, cfg.format.decimal_places, strip)
        ),
    }
}

/// Builds a [`Block`] by accumulating words in named slots, then emitting
/// them in canonical word order on [`build`](BlockBuilder::build):
///
/// motion token → other tokens → X Y Z A → F → comment
#[derive(Default)]
pub struct BlockBuilder {
    motion: Option<String>,
    tokens: Vec<String>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    a: Option<f64>,
    feed_val: Option<f64>,
    comment_text: Option<String>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        BlockBuilder::default()
    }

    /// Sets the motion token (e.g. `"G0"`, `"G1"`).
    pub fn motion(mut self, code: &str) -> Self {
        self.motion = Some(code.to_string());
        self
    }

    /// Adds a plain token word (mode codes, end-of-program).
    pub fn code(mut self, code: &str) -> Self {
        self.tokens.push(code.to_string());
        self
    }

    /// Adds an axis word. `letter` must be one of X, Y, Z, A
    /// (case-insensitive); anything else is ignored.
    pub fn axis(mut self, letter: char, value: f64) -> Self {
        match letter.to_ascii_uppercase() {
            'X' => self.x = Some(value),
            'Y' => self.y = Some(value),
            'Z' => self.z = Some(value),
            'A' => self.a = Some(value),
            _ => {}
        }
        self
    }

    /// Sets the feed-rate word.
    pub fn feed(mut self, value: f64) -> Self {
        self.feed_val = Some(value);
        self
    }

    /// Sets the block comment text (without delimiters).
    pub fn comment(mut self, text: &str) -> Self {
        self.comment_text = Some(text.to_string());
        self
    }

    /// Consumes the builder and produces a [`Block`] with words in
    /// canonical order.
    pub fn build(self) -> Block {
        let mut words: Vec<Word> = Vec::with_capacity(6 + self.tokens.len());

        if let Some(code) = self.motion {
            words.push(Word::Token(code));
        }

        for code in self.tokens {
            words.push(Word::Token(code));
        }

        for (letter, opt_val) in [('X', self.x), ('Y', self.y), ('Z', self.z), ('A', self.a)] {
            if let Some(v) = opt_val {
                words.push(Word::Axis(letter, v));
            }
        }

        if let Some(v) = self.feed_val {
            words.push(Word::Feed(v));
        }

        Block {
            words,
            comment: self.comment_text,
        }
    }
}
