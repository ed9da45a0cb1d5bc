//! Extension to language-tag mapping used for code fence annotations.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("py", "python"),
        ("pyi", "python"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("ts", "typescript"),
        ("jsx", "jsx"),
        ("tsx", "tsx"),
        ("html", "html"),
        ("htm", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        ("java", "java"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("cxx", "cpp"),
        ("hpp", "cpp"),
        ("c", "c"),
        ("h", "c"),
        ("cs", "csharp"),
        ("php", "php"),
        ("rb", "ruby"),
        ("go", "go"),
        ("rs", "rust"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("kts", "kotlin"),
        ("scala", "scala"),
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "zsh"),
        ("fish", "fish"),
        ("ps1", "powershell"),
        ("sql", "sql"),
        ("json", "json"),
        ("xml", "xml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("toml", "toml"),
        ("ini", "ini"),
        ("cfg", "ini"),
        ("md", "markdown"),
        ("rst", "rst"),
        ("tex", "latex"),
        ("txt", "text"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("dart", "dart"),
        ("r", "r"),
        ("pl", "perl"),
        ("pm", "perl"),
        ("lua", "lua"),
        ("vim", "vim"),
        ("el", "elisp"),
        ("clj", "clojure"),
        ("hs", "haskell"),
        ("ml", "ocaml"),
        ("fs", "fsharp"),
        ("ex", "elixir"),
        ("exs", "elixir"),
        ("erl", "erlang"),
        ("zig", "zig"),
        ("nim", "nim"),
        ("proto", "protobuf"),
        ("graphql", "graphql"),
        ("tf", "hcl"),
        ("hcl", "hcl"),
        ("cmake", "cmake"),
        ("gradle", "groovy"),
        ("groovy", "groovy"),
        ("dockerfile", "dockerfile"),
        ("makefile", "makefile"),
    ])
});

/// Language tag for a file, derived from its extension (or a well-known
/// extensionless name such as `Dockerfile`). Unknown files are tagged `text`.
pub fn language_for_path(path: &Path) -> &'static str {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_ascii_lowercase();

    match name.as_str() {
        "dockerfile" | "containerfile" => return "dockerfile",
        "makefile" | "gnumakefile" => return "makefile",
        "cmakelists.txt" => return "cmake",
        "rakefile" | "gemfile" | "vagrantfile" => return "ruby",
        "jenkinsfile" => return "groovy",
        _ => {}
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    EXTENSION_LANGUAGES.get(ext.as_str()).copied().unwrap_or("text")
}
