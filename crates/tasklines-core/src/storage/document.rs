//! A Markdown file held as lines, with task lookup and in-place replacement.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::DocumentError;
use crate::markdown::{parse_task_line, to_lines};
use crate::status::StatusRegistry;
use crate::task::{Task, TaskLocation};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}#{1,6}\s+(.*?)\s*#*\s*$").expect("valid heading regex"));

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s>]*(```|~~~)").expect("valid code fence regex"));

/// Each line keeps its own terminator: `"\n"`, `"\r\n"`, or `""` for a
/// final line without a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
    endings: Vec<&'static str>,
}

impl Document {
    /// Read a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_content(path, &content))
    }

    /// Build a document from text already in memory.
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        let (lines, endings) = content
            .split_inclusive('\n')
            .map(|raw| {
                if let Some(text) = raw.strip_suffix("\r\n") {
                    (text.to_string(), "\r\n")
                } else if let Some(text) = raw.strip_suffix('\n') {
                    (text.to_string(), "\n")
                } else {
                    (raw.to_string(), "")
                }
            })
            .unzip();
        Document {
            path: path.into(),
            lines,
            endings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every task in the document, in line order.
    ///
    /// Lines inside fenced code blocks are skipped. Each task records the
    /// nearest heading above it.
    pub fn tasks(&self, registry: &StatusRegistry) -> Vec<Task> {
        let mut tasks = Vec::new();
        let mut in_fence = false;
        let mut header: Option<String> = None;

        for (line_number, line) in self.lines.iter().enumerate() {
            if FENCE_RE.is_match(line) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some(caps) = HEADING_RE.captures(line) {
                header = caps.get(1).map(|m| m.as_str().to_string());
                continue;
            }

            let location =
                TaskLocation::new(&self.path, line_number).with_preceding_header(header.clone());
            if let Some(task) = parse_task_line(line, location, registry) {
                tasks.push(task);
            }
        }

        tasks
    }

    /// The task on a zero-based line.
    ///
    /// # Errors
    ///
    /// Fails if the line does not exist or is not a checklist item.
    pub fn task_at(
        &self,
        line_number: usize,
        registry: &StatusRegistry,
    ) -> Result<Task, DocumentError> {
        if line_number >= self.lines.len() {
            return Err(DocumentError::LineOutOfRange {
                line: line_number + 1,
                len: self.lines.len(),
            });
        }
        self.tasks(registry)
            .into_iter()
            .find(|task| task.location.line_number == line_number)
            .ok_or(DocumentError::NoTaskAtLine(line_number + 1))
    }

    /// Replace the line `original` was read from with the rendered
    /// `replacements`. An empty slice removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::LineChanged`] when the line no longer holds
    /// `original.original_markdown`.
    pub fn replace_task(
        &mut self,
        original: &Task,
        replacements: &[Task],
    ) -> Result<(), DocumentError> {
        let line_number = original.location.line_number;
        let current = self
            .lines
            .get(line_number)
            .ok_or(DocumentError::LineOutOfRange {
                line: line_number + 1,
                len: self.lines.len(),
            })?;
        if *current != original.original_markdown {
            return Err(DocumentError::LineChanged {
                line: line_number + 1,
            });
        }

        let ending = self.endings[line_number];
        let rendered = to_lines(replacements);
        let count = rendered.len();
        // Inserted lines share the replaced line's terminator; only the last
        // of them may lack one.
        let inner = if ending.is_empty() {
            self.default_ending()
        } else {
            ending
        };
        let endings: Vec<&'static str> = (0..count)
            .map(|i| if i + 1 == count { ending } else { inner })
            .collect();

        self.lines.splice(line_number..=line_number, rendered);
        self.endings.splice(line_number..=line_number, endings);

        if count == 0 && ending.is_empty() && line_number > 0 {
            // The removed line ended the file without a newline.
            self.endings[line_number - 1] = "";
        }
        Ok(())
    }

    fn default_ending(&self) -> &'static str {
        self.endings
            .iter()
            .copied()
            .find(|e| !e.is_empty())
            .unwrap_or("\n")
    }

    /// The document text, with each line's original terminator.
    pub fn contents(&self) -> String {
        self.lines
            .iter()
            .zip(&self.endings)
            .flat_map(|(line, ending)| [line.as_str(), ending])
            .collect()
    }

    /// Write the document back to where it was loaded from.
    pub fn save(&self) -> Result<(), DocumentError> {
        std::fs::write(&self.path, self.contents()).map_err(|source| DocumentError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), lines = self.lines.len(), "wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::status::Status;
    use chrono::NaiveDate;

    const NOTE: &str = "# Chores\n\
- [ ] water plants 🔁 every week 📅 2024-02-10\n\
\n\
```\n\
- [ ] not a real task\n\
```\n\
## Errands\n\
* [x] post letter ✅ 2024-02-01\n";

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 2, 11).unwrap())
    }

    #[test]
    fn tasks_skip_code_blocks_and_track_headers() {
        let doc = Document::from_content("note.md", NOTE);
        let tasks = doc.tasks(&StatusRegistry::core());

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].location.line_number, 1);
        assert_eq!(tasks[0].location.preceding_header.as_deref(), Some("Chores"));
        assert_eq!(tasks[1].location.line_number, 7);
        assert_eq!(tasks[1].location.preceding_header.as_deref(), Some("Errands"));
    }

    #[test]
    fn task_at_reports_missing_lines() {
        let doc = Document::from_content("note.md", NOTE);
        let registry = StatusRegistry::core();

        assert!(doc.task_at(1, &registry).is_ok());
        assert!(matches!(
            doc.task_at(0, &registry),
            Err(DocumentError::NoTaskAtLine(1))
        ));
        assert!(matches!(
            doc.task_at(4, &registry),
            Err(DocumentError::NoTaskAtLine(5))
        ));
        assert!(matches!(
            doc.task_at(40, &registry),
            Err(DocumentError::LineOutOfRange { line: 41, len: 8 })
        ));
    }

    #[test]
    fn completing_recurring_task_inserts_next_occurrence() {
        let mut doc = Document::from_content("note.md", NOTE);
        let task = doc.task_at(1, &StatusRegistry::core()).unwrap();
        let replacements = task.apply_status(Status::make_done(), &clock());

        doc.replace_task(&task, &replacements).unwrap();

        assert_eq!(doc.lines()[1], "- [ ] water plants 🔁 every week 📅 2024-02-17");
        assert_eq!(
            doc.lines()[2],
            "- [x] water plants 🔁 every week 📅 2024-02-10 ✅ 2024-02-11"
        );
        assert_eq!(doc.lines().len(), 9);
    }

    #[test]
    fn empty_replacement_removes_the_line() {
        let mut doc = Document::from_content("note.md", "- [ ] a\n- [ ] b\n");
        let task = doc.task_at(0, &StatusRegistry::core()).unwrap();

        doc.replace_task(&task, &[]).unwrap();
        assert_eq!(doc.contents(), "- [ ] b\n");
    }

    #[test]
    fn stale_task_is_rejected() {
        let mut doc = Document::from_content("note.md", "- [ ] a\n");
        let task = doc.task_at(0, &StatusRegistry::core()).unwrap();
        let stale = task.clone();

        doc.replace_task(&task, &[task.with_status(Status::make_done())])
            .unwrap();
        let err = doc.replace_task(&stale, &[]).unwrap_err();
        assert!(matches!(err, DocumentError::LineChanged { line: 1 }));
    }

    #[test]
    fn line_endings_are_preserved() {
        let doc = Document::from_content("note.md", "- [ ] a\r\n- [ ] b\r\n");
        assert_eq!(doc.lines()[0], "- [ ] a");
        assert_eq!(doc.contents(), "- [ ] a\r\n- [ ] b\r\n");

        let doc = Document::from_content("note.md", "- [ ] a\n- [ ] b");
        assert_eq!(doc.contents(), "- [ ] a\n- [ ] b");
    }

    #[test]
    fn mixed_line_endings_are_kept_per_line() {
        let mut doc = Document::from_content("n.md", "- [ ] a\n- [ ] b\r\n- [ ] c\n");
        let task = doc.task_at(0, &StatusRegistry::core()).unwrap();

        doc.replace_task(&task, &[task.with_status(Status::make_in_progress())])
            .unwrap();
        assert_eq!(doc.contents(), "- [/] a\n- [ ] b\r\n- [ ] c\n");
    }

    #[test]
    fn inserted_lines_reuse_the_replaced_terminator() {
        let mut doc = Document::from_content(
            "n.md",
            "- [ ] keep\n- [ ] Stretch 🔁 every day 📅 2024-02-10\r\n- [ ] tail\n",
        );
        let task = doc.task_at(1, &StatusRegistry::core()).unwrap();
        let replacements = task.apply_status(Status::make_done(), &clock());

        doc.replace_task(&task, &replacements).unwrap();
        assert_eq!(
            doc.contents(),
            "- [ ] keep\n\
             - [ ] Stretch 🔁 every day 📅 2024-02-11\r\n\
             - [x] Stretch 🔁 every day 📅 2024-02-10 ✅ 2024-02-11\r\n\
             - [ ] tail\n"
        );
    }

    #[test]
    fn last_line_without_newline_stays_unterminated() {
        let mut doc = Document::from_content("n.md", "- [ ] a\n- [ ] Daily 🔁 every day");
        let task = doc.task_at(1, &StatusRegistry::core()).unwrap();
        let replacements = task.apply_status(Status::make_done(), &clock());
        doc.replace_task(&task, &replacements).unwrap();
        assert!(!doc.contents().ends_with('\n'));
        assert_eq!(doc.lines().len(), 3);

        let mut doc = Document::from_content("n.md", "- [ ] a\n- [ ] gone 🏁 delete");
        let task = doc.task_at(1, &StatusRegistry::core()).unwrap();
        let replacements = task.apply_status(Status::make_done(), &clock());
        doc.replace_task(&task, &replacements).unwrap();
        assert_eq!(doc.contents(), "- [ ] a");
    }

    #[test]
    fn load_and_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.md");
        std::fs::write(&path, "- [ ] ship it 📅 2024-02-10\n").unwrap();

        let mut doc = Document::load(&path).unwrap();
        let task = doc.task_at(0, &StatusRegistry::core()).unwrap();
        let replacements = task.apply_status(Status::make_done(), &clock());
        doc.replace_task(&task, &replacements).unwrap();
        doc.save().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "- [x] ship it 📅 2024-02-10 ✅ 2024-02-11\n"
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }
}
