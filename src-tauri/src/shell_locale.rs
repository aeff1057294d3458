use std::env;

use crate::DESKTOP_LOCALE_ENV;

#[derive(Debug, Clone, Copy)]
pub struct ShellTexts {
    pub menu_file: &'static str,
    pub menu_registrations: &'static str,
    pub menu_audit: &'static str,
    pub menu_reports: &'static str,
    pub menu_edit: &'static str,
    pub menu_view: &'static str,
    pub menu_window: &'static str,
    pub menu_help: &'static str,
    pub new_window: &'static str,
    pub quit: &'static str,
    pub undo: &'static str,
    pub redo: &'static str,
    pub cut: &'static str,
    pub copy: &'static str,
    pub paste: &'static str,
    pub select_all: &'static str,
    pub reload: &'static str,
    pub force_reload: &'static str,
    pub reset_zoom: &'static str,
    pub zoom_in: &'static str,
    pub zoom_out: &'static str,
    pub fullscreen: &'static str,
    pub minimize: &'static str,
    pub close_window: &'static str,
    pub about: &'static str,
}

pub fn shell_texts_for_locale(locale: &str) -> ShellTexts {
    if locale == "en-US" {
        return ShellTexts {
            menu_file: "File",
            menu_registrations: "Registrations",
            menu_audit: "Audit",
            menu_reports: "Reports",
            menu_edit: "Edit",
            menu_view: "View",
            menu_window: "Window",
            menu_help: "Help",
            new_window: "New Window",
            quit: "Quit",
            undo: "Undo",
            redo: "Redo",
            cut: "Cut",
            copy: "Copy",
            paste: "Paste",
            select_all: "Select All",
            reload: "Reload",
            force_reload: "Force Reload",
            reset_zoom: "Actual Size",
            zoom_in: "Zoom In",
            zoom_out: "Zoom Out",
            fullscreen: "Full Screen",
            minimize: "Minimize",
            close_window: "Close Window",
            about: "About",
        };
    }

    ShellTexts {
        menu_file: "Arquivo",
        menu_registrations: "Cadastros",
        menu_audit: "Auditoria",
        menu_reports: "Relatórios",
        menu_edit: "Editar",
        menu_view: "Exibir",
        menu_window: "Janela",
        menu_help: "Ajuda",
        new_window: "Nova Janela",
        quit: "Sair",
        undo: "Desfazer",
        redo: "Refazer",
        cut: "Recortar",
        copy: "Copiar",
        paste: "Colar",
        select_all: "Selecionar Tudo",
        reload: "Recarregar",
        force_reload: "Forçar Recarregar",
        reset_zoom: "Resetar Zoom",
        zoom_in: "Ampliar Zoom",
        zoom_out: "Diminuir Zoom",
        fullscreen: "Tela Cheia",
        minimize: "Minimizar",
        close_window: "Fechar Janela",
        about: "Sobre",
    }
}

pub fn resolve_shell_locale(default_shell_locale: &'static str) -> &'static str {
    for env_key in [DESKTOP_LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Ok(value) = env::var(env_key) {
            if let Some(locale) = normalize_shell_locale(&value) {
                return locale;
            }
        }
    }

    default_shell_locale
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "pt-BR" {
        return Some("pt-BR");
    }
    if raw == "en-US" {
        return Some("en-US");
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("pt") {
        return Some("pt-BR");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_texts_for_locale_returns_english_copy() {
        let texts = shell_texts_for_locale("en-US");
        assert_eq!(texts.menu_registrations, "Registrations");
        assert_eq!(texts.quit, "Quit");
        assert_eq!(texts.zoom_in, "Zoom In");
    }

    #[test]
    fn shell_texts_for_locale_falls_back_to_portuguese_copy() {
        let texts = shell_texts_for_locale("fr-FR");
        assert_eq!(texts.menu_registrations, "Cadastros");
        assert_eq!(texts.quit, "Sair");
        assert_eq!(texts.force_reload, "Forçar Recarregar");
    }

    #[test]
    fn normalize_shell_locale_accepts_language_prefixes() {
        assert_eq!(normalize_shell_locale("EN_us.UTF-8"), Some("en-US"));
        assert_eq!(normalize_shell_locale("pt_PT"), Some("pt-BR"));
        assert_eq!(normalize_shell_locale("fr-FR"), None);
        assert_eq!(normalize_shell_locale("  "), None);
    }
}
