// src/services/status_ledger.rs

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{order::OrderStatus, reseller::Reseller, supplier::SubmissionOutcome};

/// Aplica o resultado do envio a todos os pedidos contribuintes da revenda.
///
/// Aceito -> `Enviado`; recusa ou falha de transporte -> `Erro`. Pedidos já
/// `Enviado` não mudam. Retorna quantos pedidos tiveram o status alterado.
/// Quem chama é responsável por gravar o documento da revenda em seguida.
pub fn apply_outcome(
    reseller: &mut Reseller,
    contributing_order_ids: &HashSet<Uuid>,
    outcome: &SubmissionOutcome,
) -> usize {
    let accepted = outcome.is_accepted();
    let mut changed = 0;

    for order in reseller.orders_mut() {
        if !contributing_order_ids.contains(&order.id) {
            continue;
        }

        let next = order.status.after_submission(accepted);
        if next != order.status {
            order.status = next;
            changed += 1;
        }
    }

    changed
}

pub fn count_with_status(reseller: &Reseller, status: OrderStatus) -> usize {
    reseller.orders().filter(|o| o.status == status).count()
}
