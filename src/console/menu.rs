//! The numbered main menu.

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Leave the program
    Exit,
    /// Add a new product
    Add,
    /// Delete a product
    Remove,
    /// Set a product's stock count
    Recount,
    /// Show the stock table
    List,
    /// Show one product's details
    Info,
}

impl MenuChoice {
    /// Menu entries in display order, with `Exit` last.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Remove,
        Self::Recount,
        Self::List,
        Self::Info,
        Self::Exit,
    ];

    /// Maps the number typed by the operator to a menu entry.
    #[must_use]
    pub const fn from_number(number: i64) -> Option<Self> {
        match number {
            0 => Some(Self::Exit),
            1 => Some(Self::Add),
            2 => Some(Self::Remove),
            3 => Some(Self::Recount),
            4 => Some(Self::List),
            5 => Some(Self::Info),
            _ => None,
        }
    }

    /// The number the operator types for this entry.
    #[must_use]
    pub const fn number(self) -> i64 {
        match self {
            Self::Exit => 0,
            Self::Add => 1,
            Self::Remove => 2,
            Self::Recount => 3,
            Self::List => 4,
            Self::Info => 5,
        }
    }

    /// Text shown next to the number.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::Add => "Add product",
            Self::Remove => "Remove product",
            Self::Recount => "Recount product",
            Self::List => "Show stock",
            Self::Info => "Product details",
        }
    }
}

/// The full menu text.
#[must_use]
pub fn render() -> String {
    let mut text = String::from("Hello. What would you like to do?");
    for choice in MenuChoice::ALL {
        text.push_str(&format!("\n\t{}) {}", choice.number(), choice.label()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::from_number(choice.number()), Some(choice));
        }
        assert_eq!(MenuChoice::from_number(6), None);
        assert_eq!(MenuChoice::from_number(-1), None);
    }

    #[test]
    fn test_render_lists_every_entry() {
        let menu = render();
        assert!(menu.contains("\t1) Add product"));
        assert!(menu.contains("\t5) Product details"));
        assert!(menu.ends_with("\t0) Exit"));
    }
}
