//! Defines the [`Post`] record and the front-matter parser that produces it
//! from source files. A source file is a sequence of lines; lines beginning
//! with `Title:` or `Date:` are metadata, every other line belongs to the
//! markdown body. See [`Post::from_str`] for the exact rules and
//! [`Post::to_value`]/[`Post::summarize`] for how posts are converted into
//! template values.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use chrono::NaiveDate;
use gtmpl_value::Value;

use crate::markdown;

pub(crate) const MARKDOWN_EXTENSION: &str = ".md";

const TITLE_MARKER: &str = "Title:";
const DATE_MARKER: &str = "Date:";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One parsed blog post. All fields are filled in at construction time;
/// a source file that can't produce every field is rejected by
/// [`Post::from_str`] rather than surfacing as a missing key later in the
/// pipeline.
#[derive(Clone, Debug)]
pub struct Post {
    /// The source file name less the `.md` extension.
    pub id: String,

    /// The text after the `Title:` marker, trimmed.
    pub title: String,

    /// The date after the `Date:` marker, parsed as `YYYY-MM-DD`.
    pub date: NaiveDate,

    /// The markdown body rendered to HTML.
    pub content: String,

    /// The site-relative location of the rendered page,
    /// `blog/{id}.html`.
    pub url: String,
}

impl Post {
    /// Reads and parses the post source file at `full_path`. `file_name` is
    /// the file's name within the source directory; it provides the post id
    /// and annotates any error with the file the error came from.
    pub fn load(file_name: &str, full_path: &Path) -> Result<Post> {
        match Self::load_file(file_name, full_path) {
            Ok(post) => Ok(post),
            Err(e) => Err(Error::Annotated(
                format!("parsing post `{}`", file_name),
                Box::new(e),
            )),
        }
    }

    fn load_file(file_name: &str, full_path: &Path) -> Result<Post> {
        let id = file_name.trim_end_matches(MARKDOWN_EXTENSION);
        let mut contents = String::new();
        File::open(full_path)?.read_to_string(&mut contents)?;
        Post::from_str(id, &contents)
    }

    /// Parses a single [`Post`] from an `id` and the source file contents.
    /// A line beginning with `Title:` sets the title to the rest of the
    /// line, trimmed; a line beginning with `Date:` sets the date likewise.
    /// Every other line is body text, kept in original order and rendered
    /// through [`markdown::to_html`]. Metadata lines may appear anywhere in
    /// the file, and a repeated marker overwrites the earlier value.
    ///
    /// The marker match is an exact prefix match at the start of the line;
    /// an indented `  Title: x` is body text, not metadata.
    pub fn from_str(id: &str, input: &str) -> Result<Post> {
        let mut title = None;
        let mut date = None;
        let mut body = String::new();
        for line in input.lines() {
            if let Some(rest) = line.strip_prefix(TITLE_MARKER) {
                title = Some(rest.trim().to_owned());
            } else if let Some(rest) = line.strip_prefix(DATE_MARKER) {
                date = Some(rest.trim().to_owned());
            } else {
                body.push_str(line);
                body.push('\n');
            }
        }

        let title = title.ok_or(Error::MissingTitle)?;
        let date = date.ok_or(Error::MissingDate)?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)?;

        Ok(Post {
            id: id.to_owned(),
            title,
            date,
            content: markdown::to_html(&body),
            url: format!("blog/{}.html", id),
        })
    }

    /// The name of the output file for this post, `{id}.html`.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.id)
    }

    /// Converts the post into the template value for its own page: an
    /// object with `title`, `date`, and `content` fields.
    pub fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), (&self.title).into());
        m.insert("date".to_owned(), Value::String(self.date.to_string()));
        m.insert("content".to_owned(), (&self.content).into());
        Value::Object(m)
    }

    /// Converts the post into its entry in the index page's `posts` list:
    /// an object with `title`, `date`, and `url` fields.
    pub fn summarize(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), (&self.title).into());
        m.insert("date".to_owned(), Value::String(self.date.to_string()));
        m.insert("url".to_owned(), (&self.url).into());
        Value::Object(m)
    }
}

/// Sorts posts by date, most recent first. The sort is stable, so posts
/// sharing a date keep their relative order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file has no `Title:` line.
    MissingTitle,

    /// Returned when a post source file has no `Date:` line.
    MissingDate,

    /// Returned when the `Date:` value is not a `YYYY-MM-DD` calendar date.
    DateParse(chrono::ParseError),

    /// Returned for I/O errors reading the source file.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingTitle => write!(f, "Post has no `Title:` line"),
            Error::MissingDate => write!(f, "Post has no `Date:` line"),
            Error::DateParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingTitle => None,
            Error::MissingDate => None,
            Error::DateParse(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<chrono::ParseError> for Error {
    /// Converts a [`chrono::ParseError`] into an [`Error`]. It allows us to
    /// use the `?` operator for date-parsing functions.
    fn from(err: chrono::ParseError) -> Error {
        Error::DateParse(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_basic() -> Result<()> {
        let post =
            Post::from_str("hello", "Title: Hello\nDate: 2024-01-01\n# Hi\n")?;
        assert_eq!(post.id, "hello");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.date, date("2024-01-01"));
        assert_eq!(post.url, "blog/hello.html");
        assert!(post.content.contains("<h1>Hi</h1>"));
        Ok(())
    }

    #[test]
    fn test_parse_trims_metadata_values() -> Result<()> {
        let post = Post::from_str(
            "spaced",
            "Title:   Spaced Out  \nDate:  2024-01-01 \n",
        )?;
        assert_eq!(post.title, "Spaced Out");
        assert_eq!(post.date, date("2024-01-01"));
        Ok(())
    }

    #[test]
    fn test_parse_metadata_anywhere() -> Result<()> {
        let post = Post::from_str(
            "late",
            "intro\n\nTitle: Late\noutro\n\nDate: 2024-01-01\n",
        )?;
        assert_eq!(post.title, "Late");
        let intro = post.content.find("intro").unwrap();
        let outro = post.content.find("outro").unwrap();
        assert!(intro < outro, "body lines must keep their order");
        Ok(())
    }

    #[test]
    fn test_parse_repeated_marker_overwrites() -> Result<()> {
        let post = Post::from_str(
            "twice",
            "Title: First\nTitle: Second\nDate: 2024-01-01\n",
        )?;
        assert_eq!(post.title, "Second");
        Ok(())
    }

    #[test]
    fn test_parse_indented_marker_is_body() -> Result<()> {
        let post = Post::from_str(
            "indented",
            "Title: Real\nDate: 2024-01-01\n  Title: fake\n",
        )?;
        assert_eq!(post.title, "Real");
        assert!(post.content.contains("Title: fake"));
        Ok(())
    }

    #[test]
    fn test_parse_missing_title() {
        match Post::from_str("untitled", "Date: 2024-01-01\nbody\n") {
            Err(Error::MissingTitle) => {}
            other => panic!("wanted MissingTitle, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_date() {
        match Post::from_str("undated", "Title: Undated\nbody\n") {
            Err(Error::MissingDate) => {}
            other => panic!("wanted MissingDate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_date() {
        match Post::from_str("bad", "Title: Bad\nDate: not-a-date\n") {
            Err(Error::DateParse(_)) => {}
            other => panic!("wanted DateParse, got {:?}", other),
        }
    }

    #[test]
    fn test_sort_newest_first_is_stable() {
        let post = |id: &str, d: &str| Post {
            id: id.to_owned(),
            title: id.to_owned(),
            date: date(d),
            content: String::new(),
            url: format!("blog/{}.html", id),
        };

        let mut posts = vec![
            post("a", "2024-01-02"),
            post("b", "2024-01-01"),
            post("c", "2024-01-02"),
            post("d", "2024-03-01"),
        ];
        sort_newest_first(&mut posts);

        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "c", "b"]);
    }
}
