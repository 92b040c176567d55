//! User-visible strings, per locale.

use vfsterm_types::config::Locale;
use vfsterm_types::error::TermError;
use vfsterm_vfs::PathSegments;

/// Command names in the order they are advertised.
pub const COMMAND_NAMES: [&str; 5] = ["ls", "cd", "clear", "vfs-save", "exit"];

/// Message table for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Lines shown when a session starts.
    pub fn banner(&self) -> Vec<String> {
        let commands = COMMAND_NAMES.join(", ");
        match self.locale {
            Locale::En => vec![
                "Welcome to VFS Terminal Emulator".to_string(),
                "Type 'exit' to quit".to_string(),
                format!("Available commands: {commands}"),
            ],
            Locale::Ru => vec![
                "Добро пожаловать в VFS Terminal Emulator".to_string(),
                "Введите 'exit' для выхода".to_string(),
                format!("Доступные команды: {commands}"),
            ],
        }
    }

    pub fn farewell(&self) -> String {
        match self.locale {
            Locale::En => "Leaving VFS Terminal Emulator...".to_string(),
            Locale::Ru => "Выход из VFS Terminal Emulator...".to_string(),
        }
    }

    pub fn cd_root(&self, path: &PathSegments) -> String {
        match self.locale {
            Locale::En => format!("Moved to root directory: {path}"),
            Locale::Ru => format!("Переход в корневую директорию: {path}"),
        }
    }

    pub fn cd_up(&self, path: &PathSegments) -> String {
        match self.locale {
            Locale::En => format!("Current directory: {path}"),
            Locale::Ru => format!("Текущая директория: {path}"),
        }
    }

    pub fn cd_to(&self, path: &PathSegments) -> String {
        match self.locale {
            Locale::En => format!("Moved to: {path}"),
            Locale::Ru => format!("Переход в: {path}"),
        }
    }

    pub fn already_at_root(&self) -> String {
        match self.locale {
            Locale::En => "Already at root directory".to_string(),
            Locale::Ru => "Вы уже в корневой директории".to_string(),
        }
    }

    pub fn save_usage(&self) -> String {
        match self.locale {
            Locale::En => "Usage: vfs-save <path>".to_string(),
            Locale::Ru => "Использование: vfs-save <путь>".to_string(),
        }
    }

    pub fn saved(&self, rows: usize, path: &str) -> String {
        match self.locale {
            Locale::En => format!("Saved {rows} records to {path}"),
            Locale::Ru => format!("Сохранено записей: {rows} в {path}"),
        }
    }

    /// Render an error as the single line shown to the user.
    pub fn error_line(&self, err: &TermError) -> String {
        match (self.locale, err) {
            (Locale::En, TermError::NotFound(p)) => format!("No such file or directory: {p}"),
            (Locale::Ru, TermError::NotFound(p)) => format!("Нет такого файла или каталога: {p}"),
            (Locale::En, TermError::NotADirectory(p)) => format!("Not a directory: {p}"),
            (Locale::Ru, TermError::NotADirectory(p)) => format!("Не является каталогом: {p}"),
            (Locale::En, TermError::CommandNotFound(c)) => format!("Command '{c}' not found"),
            (Locale::Ru, TermError::CommandNotFound(c)) => format!("Команда '{c}' не найдена"),
            (Locale::En, TermError::Parse(m)) => format!("Parse error: {m}"),
            (Locale::Ru, TermError::Parse(m)) => format!("Ошибка парсинга: {m}"),
            (Locale::En, TermError::Save(m)) => format!("Save failed: {m}"),
            (Locale::Ru, TermError::Save(m)) => format!("Ошибка сохранения: {m}"),
            (Locale::En, TermError::Script(m)) => format!("Cannot read script {m}"),
            (Locale::Ru, TermError::Script(m)) => format!("Не удалось прочитать скрипт {m}"),
            (_, other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lists_every_command() {
        for locale in [Locale::En, Locale::Ru] {
            let banner = Messages::new(locale).banner();
            assert_eq!(banner.len(), 3);
            for name in COMMAND_NAMES {
                assert!(banner[2].contains(name), "{locale:?} banner misses {name}");
            }
        }
    }

    #[test]
    fn english_error_lines() {
        let msg = Messages::new(Locale::En);
        assert_eq!(
            msg.error_line(&TermError::NotFound("/nope".into())),
            "No such file or directory: /nope"
        );
        assert_eq!(
            msg.error_line(&TermError::CommandNotFound("foo".into())),
            "Command 'foo' not found"
        );
        assert_eq!(
            msg.error_line(&TermError::Parse("unterminated double quote".into())),
            "Parse error: unterminated double quote"
        );
    }

    #[test]
    fn script_error_lines() {
        let err = TermError::Script("start.vfs: not found".into());
        assert_eq!(
            Messages::new(Locale::En).error_line(&err),
            "Cannot read script start.vfs: not found"
        );
        assert_eq!(
            Messages::new(Locale::Ru).error_line(&err),
            "Не удалось прочитать скрипт start.vfs: not found"
        );
    }

    #[test]
    fn russian_error_lines() {
        let msg = Messages::new(Locale::Ru);
        assert_eq!(
            msg.error_line(&TermError::CommandNotFound("foo".into())),
            "Команда 'foo' не найдена"
        );
        assert_eq!(msg.already_at_root(), "Вы уже в корневой директории");
    }

    #[test]
    fn fallback_uses_error_display() {
        let msg = Messages::new(Locale::Ru);
        let line = msg.error_line(&TermError::Load("bad row".into()));
        assert_eq!(line, "load error: bad row");
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Messages::default().locale(), Locale::En);
    }
}
