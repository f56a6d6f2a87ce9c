//! Text rendering of the storefront screens.
//!
//! Every view writes to a `Write` so commands can target stdout and tests can
//! target a buffer.

use std::io::{self, Write};

use vitrine_storefront::address::{CachedAddress, FREE_SHIPPING_MESSAGE};
use vitrine_storefront::cart::CartStore;
use vitrine_storefront::clock::Clock;
use vitrine_storefront::product::{Gallery, Product, ProductOptions};
use vitrine_storefront::storage::Storage;

pub const HOME_TITLE: &str = "Desafio Montink";
pub const HOME_TAGLINE: &str =
    "Bem-vindo à loja online mais prática e dinâmica. Veja o produto com `vitrine product show`.";

/// Home screen with the cart badge.
pub fn home(out: &mut impl Write, cart_items: u64) -> io::Result<()> {
    writeln!(out, "{HOME_TITLE}")?;
    writeln!(out, "{HOME_TAGLINE}")?;
    writeln!(out)?;
    writeln!(out, "Carrinho: {}", items_label(cart_items))
}

/// Product page: details, gallery, current selection, and shipping.
pub fn product<S: Storage, C: Clock>(
    out: &mut impl Write,
    product: &Product,
    options: &ProductOptions<'_, S, C>,
    gallery: &Gallery<'_, S, C>,
    shipping: Option<&CachedAddress>,
) -> io::Result<()> {
    writeln!(out, "{}", product.title)?;
    writeln!(out, "{}", product.price)?;
    writeln!(out)?;
    writeln!(out, "{}", product.description)?;
    writeln!(out)?;

    writeln!(
        out,
        "Imagem {} de {}: {}",
        gallery.selected_index() + 1,
        gallery.images().len(),
        gallery.selected_image().unwrap_or("-")
    )?;
    writeln!(out)?;

    writeln!(out, "Tamanho: {}", choices(&product.sizes, options.size()))?;
    let colors: Vec<String> = product.colors.iter().map(|c| c.name.clone()).collect();
    writeln!(out, "Cor: {}", choices(&colors, options.color()))?;
    writeln!(out, "Quantidade: {}", options.quantity())?;

    if !options.is_complete() {
        writeln!(out, "Selecione tamanho e cor para adicionar ao carrinho.")?;
    }

    writeln!(out)?;
    match shipping {
        Some(found) => address(out, found),
        None => writeln!(out, "Calcular frete: `vitrine cep lookup <CEP>`"),
    }
}

/// Cart drawer: lines, subtotal, shipping, total.
pub fn cart<S: Storage>(out: &mut impl Write, cart: &CartStore<S>) -> io::Result<()> {
    writeln!(out, "Carrinho ({})", items_label(cart.total_items()))?;

    if cart.is_empty() {
        return writeln!(out, "Seu carrinho está vazio");
    }

    for item in cart.items() {
        writeln!(out)?;
        let line_total = item
            .line_total()
            .map_or_else(|| "-".to_string(), |total| total.to_string());
        writeln!(out, "{}  {line_total}", item.title)?;
        writeln!(
            out,
            "  Tamanho: {} | Cor: {} | Quantidade: {} x {}",
            item.size, item.color, item.quantity, item.price
        )?;
    }

    let total = cart.total_price();
    writeln!(out)?;
    writeln!(out, "Subtotal: {total}")?;
    writeln!(out, "Frete: Grátis")?;
    writeln!(out, "Total: {total}")
}

/// Resolved shipping address.
pub fn address(out: &mut impl Write, found: &CachedAddress) -> io::Result<()> {
    writeln!(out, "CEP {}", found.cep)?;
    writeln!(out, "Endereço de entrega:")?;
    writeln!(out, "{}", found.address.street_line())?;
    writeln!(out, "{}", found.address.locality_line())?;
    writeln!(out, "{FREE_SHIPPING_MESSAGE}")
}

fn items_label(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} itens")
    }
}

/// `P [M] G` with the chosen value bracketed.
fn choices(all: &[String], chosen: Option<&str>) -> String {
    all.iter()
        .map(|value| {
            if Some(value.as_str()) == chosen {
                format!("[{value}]")
            } else {
                value.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use vitrine_core::{Address, Cep, Price, Quantity};
    use vitrine_storefront::cart::CartItem;
    use vitrine_storefront::storage::MemoryStorage;

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let cart = CartStore::load(MemoryStorage::new());
        let text = render(|out| super::cart(out, &cart));
        assert!(text.contains("Carrinho (0 itens)"));
        assert!(text.contains("Seu carrinho está vazio"));
    }

    #[test]
    fn test_cart_totals() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_item(CartItem {
            id: "a".into(),
            title: "Camisa".to_string(),
            price: Price::new(Decimal::new(29990, 2)).unwrap(),
            size: "M".to_string(),
            color: "Preto".to_string(),
            quantity: Quantity::new(2).unwrap(),
            image: String::new(),
        })
        .unwrap();

        let text = render(|out| super::cart(out, &cart));
        assert!(text.contains("Carrinho (2 itens)"));
        assert!(text.contains("Tamanho: M | Cor: Preto | Quantidade: 2 x R$ 299,90"));
        assert!(text.contains("Total: R$ 599,80"));
    }

    #[test]
    fn test_home_badge() {
        let text = render(|out| home(out, 1));
        assert!(text.starts_with(HOME_TITLE));
        assert!(text.contains("Carrinho: 1 item"));
    }

    #[test]
    fn test_address() {
        let found = CachedAddress {
            cep: Cep::parse("01001000").unwrap(),
            address: Address {
                cep: "01001-000".to_string(),
                street: "Praça da Sé".to_string(),
                complement: String::new(),
                neighborhood: "Sé".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            },
        };
        let text = render(|out| address(out, &found));
        assert!(text.contains("CEP 01001-000"));
        assert!(text.contains("Sé - São Paulo/SP"));
        assert!(text.contains(FREE_SHIPPING_MESSAGE));
    }

    #[test]
    fn test_choices_marks_selection() {
        let sizes = ["P", "M", "G"].map(String::from);
        assert_eq!(choices(&sizes, Some("M")), "P [M] G");
        assert_eq!(choices(&sizes, None), "P M G");
    }
}
