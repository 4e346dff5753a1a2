use std::fs;
use std::io;
use std::path::Path;

pub const README_FILE: &str = "README.md";

const INSTRUCTIONS: &str = r#"### Initialize
```bash
$ npm install
```

### Run
```bash
$ npm run dev
```

### Build
```bash
# For windows
$ npm run build:win

# For macOS
$ npm run build:mac

# For Linux
$ npm run build:linux
```"#;

/// Renders the generated README. Only the title and the description vary.
pub fn render_readme(name: &str, description: &str) -> String {
    format!("# {name}\n{description}\n\n{INSTRUCTIONS}")
}

/// Replaces any existing README in `project_path`.
pub fn write_readme(project_path: &Path, contents: &str) -> io::Result<()> {
    fs::write(project_path.join(README_FILE), contents)
}
