// src/services/aggregation.rs

use std::collections::HashMap;

use crate::models::{
    order::ClientOrder,
    reseller::Reseller,
    supplier::AggregatedLineItem,
};

/// Pedidos `Novo` ou `Erro` de todos os clientes, na ordem em que estão guardados.
pub fn select_pending(reseller: &Reseller) -> Vec<&ClientOrder> {
    reseller.orders().filter(|o| o.status.is_pending()).collect()
}

/// Agrupa os itens dos pedidos por produto, preservando a ordem em que cada
/// produto apareceu pela primeira vez.
pub fn group_by_product(orders: &[&ClientOrder]) -> Vec<AggregatedLineItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<AggregatedLineItem> = Vec::new();

    for order in orders {
        for item in &order.items {
            let position = *index.entry(item.product.as_str()).or_insert_with(|| {
                grouped.push(AggregatedLineItem {
                    product: item.product.clone(),
                    quantity: 0,
                    unit_price: item.unit_price,
                    order_ids: Vec::new(),
                });
                grouped.len() - 1
            });

            let entry = &mut grouped[position];
            // Preços divergentes para o mesmo produto: vale o primeiro.
            if entry.unit_price != item.unit_price {
                tracing::debug!(
                    product = %item.product,
                    kept = %entry.unit_price,
                    ignored = %item.unit_price,
                    order_id = %order.id,
                    "Preço unitário divergente ignorado na consolidação"
                );
            }
            entry.quantity += u64::from(item.quantity);
            entry.order_ids.push(order.id);
        }
    }

    grouped
}

pub fn total_quantity(items: &[AggregatedLineItem]) -> u64 {
    items.iter().map(|i| i.quantity).sum()
}

/// Regra do pedido mínimo: tudo ou nada por revenda, sem mínimo por produto.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdGate {
    minimum_quantity: u64,
}

impl ThresholdGate {
    pub fn new(minimum_quantity: u64) -> Self {
        Self { minimum_quantity }
    }

    pub fn minimum_quantity(&self) -> u64 {
        self.minimum_quantity
    }

    pub fn is_eligible(&self, items: &[AggregatedLineItem]) -> bool {
        total_quantity(items) >= self.minimum_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        order::{LineItem, OrderStatus},
        reseller::{NewClient, NewReseller},
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn item(product: &str, quantity: u32, unit_price: Decimal) -> LineItem {
        LineItem {
            product: product.into(),
            product_name: None,
            quantity,
            unit_price,
        }
    }

    fn reseller_with(orders_per_client: Vec<Vec<ClientOrder>>) -> Reseller {
        let mut reseller = NewReseller {
            id: None,
            cnpj: "12345678000195".into(),
            corporate_name: "Revenda".into(),
            trade_name: "Revenda".into(),
            email: "r@r.com".into(),
            phones: vec![],
            contacts: vec![],
            addresses: vec![],
        }
        .into_reseller();

        for orders in orders_per_client {
            let mut client = NewClient {
                id: None,
                document: "1".into(),
                name: "Cliente".into(),
                email: None,
                phone: None,
                address: None,
            }
            .into_client();
            client.orders = orders;
            reseller.clients.push(client);
        }
        reseller
    }

    fn order(items: Vec<LineItem>) -> ClientOrder {
        ClientOrder::new(Uuid::new_v4(), items, None).unwrap()
    }

    fn order_with_status(items: Vec<LineItem>, status: OrderStatus) -> ClientOrder {
        let mut pending = order(items);
        pending.status = status;
        pending
    }

    #[test]
    fn enviado_orders_are_never_selected() {
        let novo = order_with_status(vec![item("X", 1, dec!(1))], OrderStatus::Novo);
        let erro = order_with_status(vec![item("X", 1, dec!(1))], OrderStatus::Erro);
        let enviado = order_with_status(vec![item("X", 1, dec!(1))], OrderStatus::Enviado);
        let expected = vec![novo.id, erro.id];

        let reseller = reseller_with(vec![vec![novo, enviado], vec![erro]]);
        let pending: Vec<_> = select_pending(&reseller).iter().map(|o| o.id).collect();

        assert_eq!(pending, expected);
    }

    #[test]
    fn quantities_are_conserved_per_product() {
        let a = order(vec![item("X", 600, dec!(2)), item("Y", 7, dec!(3))]);
        let b = order(vec![item("X", 500, dec!(2))]);
        let c = order(vec![item("Y", 3, dec!(3)), item("Z", 0, dec!(9))]);
        let orders = vec![&a, &b, &c];

        let grouped = group_by_product(&orders);

        let products: Vec<_> = grouped.iter().map(|g| g.product.as_str()).collect();
        assert_eq!(products, vec!["X", "Y", "Z"]);
        for g in &grouped {
            let expected: u64 = orders
                .iter()
                .flat_map(|o| o.items.iter())
                .filter(|i| i.product == g.product)
                .map(|i| u64::from(i.quantity))
                .sum();
            assert_eq!(g.quantity, expected, "produto {}", g.product);
        }
        assert_eq!(grouped[0].order_ids, vec![a.id, b.id]);
        assert_eq!(total_quantity(&grouped), 1110);
    }

    #[test]
    fn first_seen_price_wins_and_repeated_items_repeat_the_order_id() {
        let a = order(vec![item("X", 10, dec!(5.00)), item("X", 5, dec!(4.00))]);
        let b = order(vec![item("X", 1, dec!(9.99))]);

        let grouped = group_by_product(&[&a, &b]);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].unit_price, dec!(5.00));
        assert_eq!(grouped[0].quantity, 16);
        assert_eq!(grouped[0].order_ids, vec![a.id, a.id, b.id]);
    }

    #[test]
    fn no_pending_orders_yield_an_empty_aggregate() {
        assert!(group_by_product(&[]).is_empty());
    }

    #[test]
    fn gate_boundary_is_inclusive() {
        let gate = ThresholdGate::new(1000);
        let at = |q: u64| {
            vec![AggregatedLineItem {
                product: "X".into(),
                quantity: q,
                unit_price: dec!(1),
                order_ids: vec![],
            }]
        };

        assert!(gate.is_eligible(&at(1000)));
        assert!(gate.is_eligible(&at(1100)));
        assert!(!gate.is_eligible(&at(999)));
    }

    #[test]
    fn gate_sums_across_products() {
        let gate = ThresholdGate::new(10);
        let line = |product: &str, quantity: u64| AggregatedLineItem {
            product: product.into(),
            quantity,
            unit_price: dec!(1),
            order_ids: vec![],
        };
        let items = vec![line("X", 6), line("Y", 4)];
        assert!(gate.is_eligible(&items));
    }
}
