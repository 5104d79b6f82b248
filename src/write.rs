//! Writes [`Post`]s to disk as HTML pages: one page per post plus the index
//! page listing every post. The templating is delegated to [`gtmpl`]; the
//! [`Writer`] borrows templates that have already been parsed (see
//! [`crate::build::build_site`]) so nothing here is process-wide state.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use gtmpl::{Context, Template, Value};

use crate::post::Post;

/// Responsible for templating and writing HTML pages to disk from [`Post`]
/// sources.
pub struct Writer<'a> {
    /// The template for post pages. It consumes `title`, `date`, and
    /// `content` values.
    pub post_template: &'a Template,

    /// The template for the index page. It consumes a `posts` value: the
    /// ordered list of posts, each exposing `title`, `date`, and `url`.
    pub index_template: &'a Template,

    /// The directory in which the HTML files are written. Post pages land
    /// at `{output_directory}/{id}.html`, the index page at
    /// `{output_directory}/index.html`.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// Templates a single [`Post`] and writes it to
    /// `{output_directory}/{id}.html`, overwriting any existing file at
    /// that path.
    pub fn write_post_page(&self, post: &Post) -> Result<()> {
        self.post_template.execute(
            &mut File::create(self.output_directory.join(post.file_name()))?,
            &Context::from(post.to_value())?,
        )?;
        Ok(())
    }

    /// Templates the index page from an already-sorted slice of [`Post`]s
    /// and writes it to `{output_directory}/index.html`.
    pub fn write_index(&self, posts: &[Post]) -> Result<()> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert(
            "posts".to_owned(),
            Value::Array(posts.iter().map(Post::summarize).collect()),
        );
        self.index_template.execute(
            &mut File::create(self.output_directory.join("index.html"))?,
            &Context::from(Value::Object(m))?,
        )?;
        Ok(())
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}
