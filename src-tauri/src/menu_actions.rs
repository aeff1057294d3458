use crate::{
    geometry::Position,
    window_registry::{ChildWindowOptions, WindowRequest},
    window_zoom::ZoomChange,
    DASHBOARD_ROUTE,
};

pub const MENU_NEW_WINDOW: &str = "menu_new_window";
pub const MENU_QUIT: &str = "menu_quit";
pub const MENU_RELOAD: &str = "menu_reload";
pub const MENU_FORCE_RELOAD: &str = "menu_force_reload";
pub const MENU_ZOOM_RESET: &str = "menu_zoom_reset";
pub const MENU_ZOOM_IN: &str = "menu_zoom_in";
pub const MENU_ZOOM_OUT: &str = "menu_zoom_out";

pub const MENU_CATEGORY: &str = "menu_cadastro_categoria";
pub const MENU_PAYMENT_METHOD: &str = "menu_cadastro_forma_pagamento";
pub const MENU_STORE: &str = "menu_cadastro_loja";
pub const MENU_USER: &str = "menu_cadastro_usuario";
pub const MENU_PAUSE_REASON: &str = "menu_cadastro_motivo_pausa";
pub const MENU_LOSS_REASON: &str = "menu_cadastro_motivo_perda";
pub const MENU_GENDER: &str = "menu_cadastro_genero";
pub const MENU_QUESTIONS: &str = "menu_cadastro_perguntas";
pub const MENU_OPERATIONAL_ASSESSMENT: &str = "menu_cadastro_avaliacao_operacional";
pub const MENU_AUDIT_SCHEDULING: &str = "menu_auditoria_agendamento";
pub const MENU_SALES_REPORTS: &str = "menu_relatorios_vendas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuGroup {
    File,
    Registrations,
    Audit,
    Reports,
}

/// A menu leaf that opens a route in a child window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuWindowEntry {
    pub id: &'static str,
    pub group: MenuGroup,
    pub route: &'static str,
    pub title: &'static str,
    pub title_en: &'static str,
    pub accelerator: Option<&'static str>,
    pub options: ChildWindowOptions,
}

impl MenuWindowEntry {
    pub fn title_for(&self, locale: &str) -> &'static str {
        if locale == "en-US" {
            self.title_en
        } else {
            self.title
        }
    }

    pub fn window_request(&self, locale: &str) -> WindowRequest {
        WindowRequest::new(self.route, self.title_for(locale)).with_options(self.options)
    }
}

const REGISTRATION_FORM: ChildWindowOptions = ChildWindowOptions::sized(640, 520);
const REGISTRATION_TABLE: ChildWindowOptions = ChildWindowOptions::sized(960, 640);

pub const MENU_WINDOW_ENTRIES: &[MenuWindowEntry] = &[
    MenuWindowEntry {
        id: MENU_NEW_WINDOW,
        group: MenuGroup::File,
        route: DASHBOARD_ROUTE,
        title: "Dashboard",
        title_en: "Dashboard",
        accelerator: Some("CmdOrCtrl+N"),
        options: ChildWindowOptions::sized(600, 600),
    },
    MenuWindowEntry {
        id: MENU_CATEGORY,
        group: MenuGroup::Registrations,
        route: "/cadastros/categoria",
        title: "Categoria",
        title_en: "Category",
        accelerator: None,
        options: REGISTRATION_FORM,
    },
    MenuWindowEntry {
        id: MENU_PAYMENT_METHOD,
        group: MenuGroup::Registrations,
        route: "/cadastros/forma-pagamento",
        title: "Forma de Pagamento",
        title_en: "Payment Method",
        accelerator: None,
        options: REGISTRATION_FORM,
    },
    MenuWindowEntry {
        id: MENU_STORE,
        group: MenuGroup::Registrations,
        route: "/cadastros/loja",
        title: "Loja",
        title_en: "Store",
        accelerator: None,
        options: REGISTRATION_TABLE,
    },
    MenuWindowEntry {
        id: MENU_USER,
        group: MenuGroup::Registrations,
        route: "/cadastros/usuario",
        title: "Usuário",
        title_en: "User",
        accelerator: None,
        options: REGISTRATION_TABLE,
    },
    MenuWindowEntry {
        id: MENU_PAUSE_REASON,
        group: MenuGroup::Registrations,
        route: "/cadastros/motivo-pausa",
        title: "Motivo de Pausa",
        title_en: "Pause Reason",
        accelerator: None,
        options: REGISTRATION_FORM,
    },
    MenuWindowEntry {
        id: MENU_LOSS_REASON,
        group: MenuGroup::Registrations,
        route: "/cadastros/motivo-perda",
        title: "Motivo de Perda",
        title_en: "Loss Reason",
        accelerator: None,
        options: REGISTRATION_FORM,
    },
    MenuWindowEntry {
        id: MENU_GENDER,
        group: MenuGroup::Registrations,
        route: "/cadastros/genero",
        title: "Gênero",
        title_en: "Gender",
        accelerator: None,
        options: REGISTRATION_FORM,
    },
    MenuWindowEntry {
        id: MENU_QUESTIONS,
        group: MenuGroup::Registrations,
        route: "/cadastros/perguntas",
        title: "Perguntas",
        title_en: "Questions",
        accelerator: None,
        options: REGISTRATION_TABLE,
    },
    MenuWindowEntry {
        id: MENU_OPERATIONAL_ASSESSMENT,
        group: MenuGroup::Registrations,
        route: "/cadastros/avaliacao-operacional",
        title: "Avaliação Operacional",
        title_en: "Operational Assessment",
        accelerator: None,
        options: REGISTRATION_TABLE,
    },
    MenuWindowEntry {
        id: MENU_AUDIT_SCHEDULING,
        group: MenuGroup::Audit,
        route: "/auditoria/agendamento",
        title: "Agendamento de Auditoria",
        title_en: "Audit Scheduling",
        accelerator: None,
        options: ChildWindowOptions::sized(1024, 720),
    },
    MenuWindowEntry {
        id: MENU_SALES_REPORTS,
        group: MenuGroup::Reports,
        route: "/relatorios",
        title: "Relatórios de Vendas",
        title_en: "Sales Reports",
        accelerator: None,
        options: ChildWindowOptions::sized(1024, 768).with_offset(Position::new(80, 60)),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenWindow(&'static MenuWindowEntry),
    ReloadFocusedWindow,
    ForceReloadFocusedWindow,
    ZoomFocusedWindow(ZoomChange),
    Quit,
}

pub fn entries_in(group: MenuGroup) -> impl Iterator<Item = &'static MenuWindowEntry> {
    MENU_WINDOW_ENTRIES
        .iter()
        .filter(move |entry| entry.group == group)
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_RELOAD => Some(MenuAction::ReloadFocusedWindow),
        MENU_FORCE_RELOAD => Some(MenuAction::ForceReloadFocusedWindow),
        MENU_ZOOM_RESET => Some(MenuAction::ZoomFocusedWindow(ZoomChange::Reset)),
        MENU_ZOOM_IN => Some(MenuAction::ZoomFocusedWindow(ZoomChange::In)),
        MENU_ZOOM_OUT => Some(MenuAction::ZoomFocusedWindow(ZoomChange::Out)),
        MENU_QUIT => Some(MenuAction::Quit),
        _ => MENU_WINDOW_ENTRIES
            .iter()
            .find(|entry| entry.id == menu_id)
            .map(MenuAction::OpenWindow),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::geometry::Size;

    #[test]
    fn action_from_menu_id_maps_fixed_actions() {
        assert_eq!(
            action_from_menu_id(MENU_RELOAD),
            Some(MenuAction::ReloadFocusedWindow)
        );
        assert_eq!(action_from_menu_id(MENU_QUIT), Some(MenuAction::Quit));
        assert_eq!(
            action_from_menu_id(MENU_FORCE_RELOAD),
            Some(MenuAction::ForceReloadFocusedWindow)
        );
    }

    #[test]
    fn action_from_menu_id_maps_zoom_items() {
        assert_eq!(
            action_from_menu_id(MENU_ZOOM_RESET),
            Some(MenuAction::ZoomFocusedWindow(ZoomChange::Reset))
        );
        assert_eq!(
            action_from_menu_id(MENU_ZOOM_IN),
            Some(MenuAction::ZoomFocusedWindow(ZoomChange::In))
        );
        assert_eq!(
            action_from_menu_id(MENU_ZOOM_OUT),
            Some(MenuAction::ZoomFocusedWindow(ZoomChange::Out))
        );
    }

    #[test]
    fn action_from_menu_id_maps_every_window_entry() {
        for entry in MENU_WINDOW_ENTRIES {
            match action_from_menu_id(entry.id) {
                Some(MenuAction::OpenWindow(found)) => assert_eq!(found.route, entry.route),
                other => panic!("unexpected action for {}: {other:?}", entry.id),
            }
        }
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
    }

    #[test]
    fn menu_ids_and_routes_are_unique() {
        let ids: HashSet<_> = MENU_WINDOW_ENTRIES.iter().map(|entry| entry.id).collect();
        let routes: HashSet<_> = MENU_WINDOW_ENTRIES
            .iter()
            .map(|entry| entry.route)
            .collect();
        assert_eq!(ids.len(), MENU_WINDOW_ENTRIES.len());
        assert_eq!(routes.len(), MENU_WINDOW_ENTRIES.len());
        assert!(MENU_WINDOW_ENTRIES
            .iter()
            .all(|entry| entry.route.starts_with('/')));
    }

    #[test]
    fn new_window_opens_small_dashboard() {
        let Some(MenuAction::OpenWindow(entry)) = action_from_menu_id(MENU_NEW_WINDOW) else {
            panic!("new window should open a route");
        };
        let request = entry.window_request("pt-BR");
        assert_eq!(request.route, "/dashboard");
        assert_eq!(request.options.resolved_size(), Size::new(600, 600));
        assert_eq!(request.options.resolved_offset(), Position::new(50, 50));
    }

    #[test]
    fn window_request_uses_localized_title() {
        let Some(MenuAction::OpenWindow(entry)) = action_from_menu_id(MENU_STORE) else {
            panic!("store entry should exist");
        };
        assert_eq!(entry.window_request("pt-BR").title, "Loja");
        assert_eq!(entry.window_request("en-US").title, "Store");
    }

    #[test]
    fn registrations_group_lists_all_cadastros() {
        assert_eq!(entries_in(MenuGroup::Registrations).count(), 9);
        assert_eq!(entries_in(MenuGroup::Audit).count(), 1);
        assert_eq!(entries_in(MenuGroup::Reports).count(), 1);
    }
}
