//! # View Binding
//!
//! The shop never reaches for UI elements on its own. A [`View`] reports which
//! surfaces it has bound, and [`bind`] checks them once at startup so a
//! missing surface is a configuration error instead of a failure deep inside
//! an event handler.
use std::{
    fmt::{self, Display},
    io::{self, Write},
};

use menu::{CustomizationCatalog, LineItem, MenuItem};
use tracing::warn;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Menu,
    Customization,
    CartItems,
    ReviewForm,
    ReviewNotice,
}

pub const REQUIRED_SURFACES: [Surface; 5] = [
    Surface::Menu,
    Surface::Customization,
    Surface::CartItems,
    Surface::ReviewForm,
    Surface::ReviewNotice,
];

impl Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Menu => "menu",
            Self::Customization => "customization",
            Self::CartItems => "cart-items",
            Self::ReviewForm => "review-form",
            Self::ReviewNotice => "review-notice",
        };

        f.write_str(name)
    }
}

pub trait View {
    fn surfaces(&self) -> Vec<Surface>;

    /// Appends below whatever is already shown.
    fn append_menu_items(&mut self, items: &[MenuItem]);

    fn show_customization(&mut self, item: &MenuItem, catalog: &CustomizationCatalog);

    fn hide_customization(&mut self);

    /// Replaces the cart listing and count.
    fn render_cart(&mut self, items: &[LineItem]);

    fn reset_review_form(&mut self);

    fn set_review_notice(&mut self, visible: bool);
}

pub fn bind(view: &impl View) -> Result<(), ClientError> {
    let bound = view.surfaces();

    match REQUIRED_SURFACES
        .into_iter()
        .find(|surface| !bound.contains(surface))
    {
        Some(missing) => Err(ClientError::Binding(missing)),
        None => Ok(()),
    }
}

/// Keeps what a screen would show, for driving the shop without a terminal.
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    pub menu: Vec<MenuItem>,
    pub customizing: Option<MenuItem>,
    pub cart: Vec<LineItem>,
    pub review_form_resets: usize,
    pub review_notice: bool,
    pub unbound: Vec<Surface>,
}

impl HeadlessView {
    pub fn without(surface: Surface) -> Self {
        Self {
            unbound: vec![surface],
            ..Self::default()
        }
    }
}

impl View for HeadlessView {
    fn surfaces(&self) -> Vec<Surface> {
        REQUIRED_SURFACES
            .into_iter()
            .filter(|surface| !self.unbound.contains(surface))
            .collect()
    }

    fn append_menu_items(&mut self, items: &[MenuItem]) {
        self.menu.extend_from_slice(items);
    }

    fn show_customization(&mut self, item: &MenuItem, _catalog: &CustomizationCatalog) {
        self.customizing = Some(item.clone());
    }

    fn hide_customization(&mut self) {
        self.customizing = None;
    }

    fn render_cart(&mut self, items: &[LineItem]) {
        self.cart = items.to_vec();
    }

    fn reset_review_form(&mut self) {
        self.review_form_resets += 1;
    }

    fn set_review_notice(&mut self, visible: bool) {
        self.review_notice = visible;
    }
}

/// Writes every render straight to a terminal (or any writer). Muted surfaces
/// stay bound but print nothing, so a command can show only what it is about.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
    muted: Vec<Surface>,
}

impl<W: Write> TerminalView<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            muted: Vec::new(),
        }
    }

    pub fn muted(mut self, surface: Surface) -> Self {
        self.muted.push(surface);
        self
    }

    pub fn unmute(&mut self, surface: Surface) {
        self.muted.retain(|muted| *muted != surface);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, surface: Surface, draw: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.muted.contains(&surface) {
            return;
        }

        if let Err(e) = draw(&mut self.out) {
            warn!("Failed to draw {surface}: {e}");
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn surfaces(&self) -> Vec<Surface> {
        REQUIRED_SURFACES.to_vec()
    }

    fn append_menu_items(&mut self, items: &[MenuItem]) {
        self.emit(Surface::Menu, |out| {
            for item in items {
                writeln!(out, "{:<24} {:>7}   {}", item.name, item.price.to_string(), item.category)?;
            }
            Ok(())
        });
    }

    fn show_customization(&mut self, item: &MenuItem, catalog: &CustomizationCatalog) {
        self.emit(Surface::Customization, |out| {
            writeln!(out, "Customize {} ({})", item.name, item.price)?;
            writeln!(out, "  Ice:   {}", catalog.ice_levels.join(", "))?;
            writeln!(out, "  Sugar: {}", catalog.sugar_levels.join(", "))?;

            let toppings: Vec<String> = catalog
                .toppings
                .iter()
                .map(|topping| format!("{} (+{})", topping.name, topping.price))
                .collect();
            writeln!(out, "  Toppings: {}", toppings.join(", "))
        });
    }

    fn hide_customization(&mut self) {}

    fn render_cart(&mut self, items: &[LineItem]) {
        self.emit(Surface::CartItems, |out| {
            if items.is_empty() {
                return writeln!(out, "Cart is empty");
            }

            for (index, line) in items.iter().enumerate() {
                writeln!(out, "[{index}] {line}")?;
            }
            writeln!(out, "Items: {}  Total: {}", items.len(), menu::order_total(items))
        });
    }

    fn reset_review_form(&mut self) {}

    fn set_review_notice(&mut self, visible: bool) {
        if visible {
            self.emit(Surface::ReviewNotice, |out| writeln!(out, "Thanks for the review!"));
        }
    }
}

#[cfg(test)]
mod tests {
    use menu::{CustomizationSelection, Price, ToppingOption};

    use super::*;

    fn classic() -> MenuItem {
        MenuItem {
            id: None,
            name: "Classic".to_string(),
            price: Price::from_cents(450),
            image: None,
            category: "Milk Tea".to_string(),
        }
    }

    fn printed(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_bind_accepts_full_view() {
        assert!(bind(&HeadlessView::default()).is_ok());
    }

    #[test]
    fn test_bind_reports_missing_surface() {
        let err = bind(&HeadlessView::without(Surface::CartItems)).unwrap_err();

        assert!(matches!(err, ClientError::Binding(Surface::CartItems)));
        assert_eq!(err.to_string(), "Required surface cart-items is not bound");
    }

    #[test]
    fn test_terminal_view_prints_cart() {
        let boba = ToppingOption {
            id: None,
            name: "Boba".to_string(),
            price: Price::from_cents(75),
        };
        let line = LineItem::new(
            classic(),
            CustomizationSelection {
                ice_level: "Less Ice".to_string(),
                sugar_level: "50%".to_string(),
                toppings: vec![boba],
                size: None,
            },
        );

        let mut view = TerminalView::new(Vec::new());
        assert!(bind(&view).is_ok());
        view.render_cart(&[]);
        view.render_cart(&[line]);

        assert_eq!(
            printed(view),
            "Cart is empty\n\
             [0] Classic - $5.25 (Ice: Less Ice, Sugar: 50%, Toppings: Boba)\n\
             Items: 1  Total: $5.25\n"
        );
    }

    #[test]
    fn test_muted_surfaces_print_nothing() {
        let mut view = TerminalView::new(Vec::new()).muted(Surface::Menu);
        assert!(bind(&view).is_ok());

        view.append_menu_items(&[classic()]);
        view.set_review_notice(true);
        view.unmute(Surface::Menu);
        view.append_menu_items(&[classic()]);

        let output = printed(view);
        assert_eq!(output.lines().count(), 2);
        assert_eq!(output.lines().next(), Some("Thanks for the review!"));
        assert!(output.contains("Classic") && output.contains("$4.50"));
    }
}
