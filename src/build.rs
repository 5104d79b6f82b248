//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: parsing the posts
//! ([`crate::post`]) and rendering the post and index pages
//! ([`crate::write`]).

use std::fmt;
use std::fs::{create_dir_all, read_dir, File};
use std::path::{Path, PathBuf};

use gtmpl::Template;
use tracing::{debug, info};

use crate::config::Config;
use crate::post::{self, sort_newest_first, Error as ParseError, Post};
use crate::write::{Error as WriteError, Writer};

/// Builds the site from a [`Config`] object, in order: load and parse the
/// two templates, create the output directory, parse each `*.md` source
/// file and write its page, sort the posts by date descending, and write
/// the index page.
///
/// Any failure is fatal and aborts the remaining steps. Pages already
/// written stay on disk; there is no rollback, so a failed build can leave
/// post pages without a matching index.
pub fn build_site(config: &Config) -> Result<()> {
    let post_template = parse_template(&config.post_template())?;
    let index_template = parse_template(&config.index_template())?;

    let blog_directory = config.blog_directory();
    create_dir_all(&blog_directory)?;

    let writer = Writer {
        post_template: &post_template,
        index_template: &index_template,
        output_directory: &blog_directory,
    };

    // Each post page is written as soon as its source is parsed; only the
    // index waits for the full list. Directory enumeration order is
    // whatever the platform returns.
    let mut posts: Vec<Post> = Vec::new();
    for result in read_dir(&config.source_directory)? {
        let entry = result?;
        let os_file_name = entry.file_name();
        let file_name = os_file_name.to_string_lossy();
        if file_name.ends_with(post::MARKDOWN_EXTENSION) {
            let post = Post::load(&file_name, &entry.path())?;
            debug!("rendered `{}` -> `{}`", file_name, post.url);
            writer.write_post_page(&post)?;
            posts.push(post);
        }
    }
    info!("wrote {} post pages", posts.len());

    sort_newest_first(&mut posts);
    writer.write_index(&posts)?;
    info!("wrote index page");

    Ok(())
}

// Loads the template file contents and parses them into a template.
fn parse_template(template_file: &Path) -> Result<Template> {
    use std::io::Read;
    let mut contents = String::new();
    File::open(template_file)
        .map_err(|e| Error::OpenTemplateFile {
            path: template_file.to_owned(),
            err: e,
        })?
        .read_to_string(&mut contents)?;

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during parsing,
/// writing, parsing template files, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors parsing post source files.
    Parse(ParseError),

    /// Returned for errors writing [`crate::post::Post`]s to disk as HTML
    /// files.
    Write(WriteError),

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
