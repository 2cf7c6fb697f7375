//! Frontend entrypoint per framework

use super::ProjectFiles;
use crate::config::Configuration;

pub fn render(config: &Configuration, files: &mut ProjectFiles) {
    if config.project_type.skips_frontend() {
        return;
    }
    let Some(framework) = config.frontend_framework() else {
        return;
    };
    let title = format!("{} Starter", config.project_type.heading());
    let libraries = config.ui_libraries().join(", ");

    let (path, contents) = match framework {
        "react" => ("frontend/App.tsx", react(&title, &libraries)),
        "vue" => ("frontend/App.vue", vue(&title, &libraries)),
        "svelte" => ("frontend/App.svelte", svelte(&title, &libraries)),
        "angular" => ("frontend/app.component.ts", angular(&title, &libraries)),
        "nextjs" => ("frontend/page.tsx", next_page(&title, &libraries)),
        "nuxt" => ("frontend/app.vue", vue(&title, &libraries)),
        _ => ("frontend/index.html", html(&title, framework, &libraries)),
    };
    files.add(path, contents);
}

fn line_comment(libraries: &str) -> String {
    if libraries.is_empty() {
        String::new()
    } else {
        format!("// UI libraries: {libraries}\n")
    }
}

fn html_comment(libraries: &str) -> String {
    if libraries.is_empty() {
        String::new()
    } else {
        format!("<!-- UI libraries: {libraries} -->\n")
    }
}

fn react(title: &str, libraries: &str) -> String {
    format!(
        "import React from 'react';\n{}\nexport default function App() {{\n  return (\n    <main className=\"app\">\n      <h1>{title}</h1>\n      <p>Hello from React</p>\n    </main>\n  );\n}}\n",
        line_comment(libraries)
    )
}

fn next_page(title: &str, libraries: &str) -> String {
    format!(
        "{}export default function Home() {{\n  return (\n    <main>\n      <h1>{title}</h1>\n      <p>Hello from Next.js</p>\n    </main>\n  );\n}}\n",
        line_comment(libraries)
    )
}

fn vue(title: &str, libraries: &str) -> String {
    format!(
        "{}<template>\n  <main class=\"app\">\n    <h1>{{{{ title }}}}</h1>\n    <p>Hello from Vue</p>\n  </main>\n</template>\n\n<script setup>\nconst title = '{title}';\n</script>\n",
        html_comment(libraries)
    )
}

fn svelte(title: &str, libraries: &str) -> String {
    format!(
        "{}<script>\n  let title = '{title}';\n</script>\n\n<main>\n  <h1>{{title}}</h1>\n  <p>Hello from Svelte</p>\n</main>\n",
        html_comment(libraries)
    )
}

fn angular(title: &str, libraries: &str) -> String {
    format!(
        "import {{ Component }} from '@angular/core';\n{}\n@Component({{\n  selector: 'app-root',\n  standalone: true,\n  template: `\n    <main>\n      <h1>{{{{ title }}}}</h1>\n      <p>Hello from Angular</p>\n    </main>\n  `,\n}})\nexport class AppComponent {{\n  title = '{title}';\n}}\n",
        line_comment(libraries)
    )
}

fn html(title: &str, framework: &str, libraries: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <title>{title}</title>\n</head>\n<body>\n  {}<main>\n    <h1>{title}</h1>\n    <p>Hello from {framework}</p>\n  </main>\n</body>\n</html>\n",
        html_comment(libraries)
    )
}
