use std::path::PathBuf;

/// The directory layout for one build: where posts are read from, where
/// templates are looked up, and where output is written. A [`Config`] is
/// passed into [`crate::build::build_site`] by the caller; nothing here is
/// process-wide state, so tests can point a `Config` at temporary
/// directories.
pub struct Config {
    /// The directory containing the `*.md` post source files.
    pub source_directory: PathBuf,

    /// The directory containing the template files. Templates are looked up
    /// in this directory by name: `blog_post.html` for post pages and
    /// `blog_index.html` for the index page.
    pub template_directory: PathBuf,

    /// The output root. All generated pages land under
    /// `{output_directory}/blog/`.
    pub output_directory: PathBuf,
}

impl Default for Config {
    /// The fixed site layout: posts in `content/blog`, templates in
    /// `templates`, output under `output`, all relative to the working
    /// directory.
    fn default() -> Config {
        Config {
            source_directory: PathBuf::from("content/blog"),
            template_directory: PathBuf::from("templates"),
            output_directory: PathBuf::from("output"),
        }
    }
}

impl Config {
    /// The path of the post-page template file.
    pub fn post_template(&self) -> PathBuf {
        self.template_directory.join("blog_post.html")
    }

    /// The path of the index-page template file.
    pub fn index_template(&self) -> PathBuf {
        self.template_directory.join("blog_index.html")
    }

    /// The directory into which post pages and the index page are written.
    pub fn blog_directory(&self) -> PathBuf {
        self.output_directory.join("blog")
    }
}
