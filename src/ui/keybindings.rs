pub struct Keybinding {
    pub keys: &'static str,
    pub description: &'static str,
}

pub struct KeybindingCategory {
    pub name: &'static str,
    pub bindings: &'static [Keybinding],
}

pub const KEYBINDING_CATEGORIES: &[KeybindingCategory] = &[
    KeybindingCategory {
        name: "Navigation",
        bindings: &[
            Keybinding {
                keys: "j/k",
                description: "Move down/up",
            },
            Keybinding {
                keys: "g / Home",
                description: "Jump to first contact",
            },
            Keybinding {
                keys: "G / End",
                description: "Jump to last contact",
            },
        ],
    },
    KeybindingCategory {
        name: "Contacts",
        bindings: &[
            Keybinding {
                keys: "a",
                description: "Add a contact",
            },
            Keybinding {
                keys: "e / Enter",
                description: "Edit the selected contact",
            },
            Keybinding {
                keys: "d",
                description: "Delete the selected contact",
            },
        ],
    },
    KeybindingCategory {
        name: "Sync",
        bindings: &[
            Keybinding {
                keys: "r",
                description: "Refresh from the server now",
            },
            Keybinding {
                keys: "s",
                description: "Toggle A-Z / Z-A name sort",
            },
            Keybinding {
                keys: "i",
                description: "Cycle refresh interval (5/10/30/60s)",
            },
        ],
    },
    KeybindingCategory {
        name: "General",
        bindings: &[
            Keybinding {
                keys: "?",
                description: "Show this help",
            },
            Keybinding {
                keys: "`",
                description: "Toggle the debug log panel",
            },
            Keybinding {
                keys: "q",
                description: "Quit",
            },
        ],
    },
];
