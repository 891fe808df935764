//! Word and prompt corpora.
//!
//! Both load once at startup, either from a user supplied file or from the
//! small corpus bundled into the binary, and are read-only afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::{GameError, Result};

static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

const BUNDLED_WORDS: &str = "words.txt";
const BUNDLED_PROMPTS: &str = "prompts.txt";

fn read_bundled(name: &str) -> Result<&'static str> {
    ASSETS
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| GameError::CorpusLoad {
            path: PathBuf::from(name),
            reason: "bundled file missing".into(),
        })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| GameError::CorpusLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Dictionary of accepted words with case-insensitive membership.
#[derive(Debug, Clone)]
pub struct WordCorpus {
    words: HashSet<String>,
}

impl WordCorpus {
    /// Builds a corpus from newline separated text. Blank lines are ignored.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let words: HashSet<String> = text
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        if words.is_empty() {
            return Err(GameError::CorpusLoad {
                path: origin.to_path_buf(),
                reason: "no words".into(),
            });
        }
        Ok(Self { words })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let corpus = Self::parse(&read_file(path)?, path)?;
        info!(path = %path.display(), words = corpus.len(), "loaded word corpus");
        Ok(corpus)
    }

    pub fn bundled() -> Result<Self> {
        Self::parse(read_bundled(BUNDLED_WORDS)?, Path::new(BUNDLED_WORDS))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Removes every `(...)` or `[...]` segment within a line. A segment may open
/// with either bracket and close with either; an opener with no closer later
/// on the same line is kept as-is.
pub fn strip_annotations(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(&['(', '['][..]) {
        let after = &rest[open + 1..];
        match after.find(&[')', ']'][..]) {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Supplies random prompt fragments, sampled with replacement.
#[derive(Debug, Clone)]
pub struct PromptSource {
    prompts: Vec<String>,
}

impl PromptSource {
    /// Strips annotations, trims and uppercases each line. Lines left empty
    /// are dropped so an empty prompt can never be served.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let prompts: Vec<String> = text
            .lines()
            .map(strip_annotations)
            .map(|p| p.trim().to_uppercase())
            .filter(|p| !p.is_empty())
            .collect();

        if prompts.is_empty() {
            return Err(GameError::CorpusLoad {
                path: origin.to_path_buf(),
                reason: "no prompts".into(),
            });
        }
        Ok(Self { prompts })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = Self::parse(&read_file(path)?, path)?;
        info!(path = %path.display(), prompts = source.len(), "loaded prompt corpus");
        Ok(source)
    }

    pub fn bundled() -> Result<Self> {
        Self::parse(read_bundled(BUNDLED_PROMPTS)?, Path::new(BUNDLED_PROMPTS))
    }

    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        // parse() guarantees at least one prompt
        self.prompts.choose(rng).cloned().unwrap_or_default()
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// Both corpora a session needs.
#[derive(Debug, Clone)]
pub struct Corpora {
    pub prompts: PromptSource,
    pub words: WordCorpus,
}

impl Corpora {
    /// Loads each corpus from its path when given, otherwise from the bundled copy.
    pub fn load(prompts: Option<&Path>, words: Option<&Path>) -> Result<Self> {
        let prompts = match prompts {
            Some(p) => PromptSource::load(p)?,
            None => PromptSource::bundled()?,
        };
        let words = match words {
            Some(p) => WordCorpus::load(p)?,
            None => WordCorpus::bundled()?,
        };
        Ok(Self { prompts, words })
    }
}
