//! Built-in exclusion list applied to every run.

/// Version control, dependency, build and cache directories plus binary, media,
/// secret and lock files across the common ecosystems.
pub const BUILTIN_PATTERNS: &[&str] = &[
    // Version control
    ".git/",
    ".svn/",
    ".hg/",
    ".bzr/",
    // Python
    "__pycache__/",
    ".pytest_cache/",
    ".mypy_cache/",
    ".ruff_cache/",
    ".tox/",
    ".nox/",
    "venv/",
    ".venv/",
    "env/",
    "ENV/",
    "env.bak/",
    "venv.bak/",
    "*.egg-info/",
    ".eggs/",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".coverage",
    "pip-log.txt",
    "pip-delete-this-directory.txt",
    ".dmypy.json",
    "dmypy.json",
    // JavaScript / TypeScript
    "node_modules/",
    "bower_components/",
    ".npm/",
    ".yarn/",
    ".pnp.*",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
    "lerna-debug.log*",
    ".pnpm-debug.log*",
    ".next/",
    ".nuxt/",
    ".output/",
    ".vite/",
    ".webpack/",
    ".parcel-cache/",
    ".rollup.cache/",
    ".svelte-kit/",
    ".cache/",
    ".eslintcache",
    ".stylelintcache",
    // Build output
    "dist/",
    "build/",
    "out/",
    "target/",
    "bin/",
    "obj/",
    // Mobile and JVM
    ".expo/",
    ".expo-shared/",
    ".dart_tool/",
    ".pub-cache/",
    ".pub/",
    ".flutter-plugins",
    ".flutter-plugins-dependencies",
    ".packages",
    ".m2/",
    ".gradle/",
    "gradlew",
    "gradlew.bat",
    // .NET
    "packages/",
    ".vs/",
    "*.nupkg",
    "*.snupkg",
    // Go, Ruby, PHP
    "vendor/",
    ".bundle/",
    "composer.phar",
    // Infrastructure
    ".terraform/",
    "*.tfstate",
    "*.tfstate.*",
    ".terraform.lock.hcl",
    "*.kubeconfig",
    // Editors and OS files
    ".vscode/",
    ".idea/",
    ".settings/",
    ".c9revisions/",
    "*.swp",
    "*.swo",
    "*~",
    ".project",
    ".classpath",
    "*.sublime-project",
    "*.sublime-workspace",
    ".DS_Store",
    "._*",
    ".Spotlight-V100",
    ".Trashes",
    "ehthumbs.db",
    "Thumbs.db",
    "Desktop.ini",
    // Logs, coverage and scratch space
    "*.log",
    "*.tmp",
    "*.temp",
    "*.pid",
    "*.seed",
    "*.pid.lock",
    "logs/",
    "log/",
    "tmp/",
    "temp/",
    "coverage/",
    ".nyc_output/",
    "lcov.info",
    "_site/",
    "docs/_build/",
    "*.bak",
    "*.backup",
    "*.old",
    // Lock files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "poetry.lock",
    "Pipfile.lock",
    "Gemfile.lock",
    "composer.lock",
    "go.sum",
    // Secrets
    ".env",
    ".env.local",
    ".env.*.local",
    "*.pem",
    "*.key",
    "*.p12",
    "*.p8",
    "*.mobileprovision",
    // Databases
    "*.db",
    "*.sqlite",
    "*.sqlite3",
    // Binaries and archives
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    "*.a",
    "*.lib",
    "*.o",
    "*.obj",
    "*.class",
    "*.jar",
    "*.war",
    "*.wasm",
    "*.bin",
    "*.zip",
    "*.tar",
    "*.gz",
    "*.tgz",
    "*.bz2",
    "*.xz",
    "*.7z",
    "*.rar",
    // Media and documents
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.bmp",
    "*.ico",
    "*.webp",
    "*.tiff",
    "*.psd",
    "*.mp3",
    "*.wav",
    "*.ogg",
    "*.flac",
    "*.mp4",
    "*.mov",
    "*.avi",
    "*.mkv",
    "*.webm",
    "*.pdf",
    "*.doc",
    "*.docx",
    "*.xls",
    "*.xlsx",
    "*.ppt",
    "*.pptx",
    "*.ttf",
    "*.otf",
    "*.woff",
    "*.woff2",
    "*.eot",
];
