/*
 * Responsibility
 * - technology に付けられる devicon 識別子のカタログ
 * - CDN URL の組み立て規約をここに閉じ込める (アセットはローカル保持しない)
 * - technologies の icons バリデーションと GET /icons が参照する
 */

/// 選択可能な devicon 識別子。重複なし前提 (toggle が first-match 削除なので)。
pub const DEV_ICONS: &[&str] = &[
    "amazonwebservices",
    "angularjs",
    "bash",
    "bootstrap",
    "c",
    "cplusplus",
    "csharp",
    "css3",
    "django",
    "docker",
    "dot-net",
    "express",
    "figma",
    "firebase",
    "flask",
    "git",
    "github",
    "go",
    "graphql",
    "html5",
    "java",
    "javascript",
    "jquery",
    "kubernetes",
    "laravel",
    "linux",
    "mongodb",
    "mysql",
    "nextjs",
    "nginx",
    "nodejs",
    "php",
    "postgresql",
    "python",
    "react",
    "redis",
    "rust",
    "sass",
    "spring",
    "sqlite",
    "swift",
    "tailwindcss",
    "typescript",
    "vuejs",
];

pub fn contains(icon: &str) -> bool {
    DEV_ICONS.contains(&icon)
}

pub fn cdn_url(icon: &str) -> String {
    format!("https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/{icon}.svg")
}
