use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Achievement {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub unlocked_date: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
}

pub const FIRST_RUN: u32 = 0;
pub const STREAK_3: u32 = 1;
pub const STREAK_7: u32 = 2;
pub const MARATHON: u32 = 3;
pub const STREAK_30: u32 = 4;
pub const RUNS_100: u32 = 5;

pub const CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        id: FIRST_RUN,
        name: "First Run",
        description: "Completed your first run",
    },
    CatalogEntry {
        id: STREAK_3,
        name: "3 Day Streak",
        description: "Ran 3 days in a row",
    },
    CatalogEntry {
        id: STREAK_7,
        name: "7 Day Streak",
        description: "Ran 7 days in a row",
    },
    CatalogEntry {
        id: MARATHON,
        name: "Marathon",
        description: "Completed a marathon distance",
    },
    CatalogEntry {
        id: STREAK_30,
        name: "30 Day Warrior",
        description: "Ran 30 days in a row",
    },
    CatalogEntry {
        id: RUNS_100,
        name: "100 Runs",
        description: "Logged 100 total runs",
    },
];

pub fn catalog_entry(id: u32) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}
