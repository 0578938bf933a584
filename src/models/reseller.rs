// src/models/reseller.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::order::ClientOrder;

// --- Dados de contato ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub id: Uuid,
    #[schema(example = "11999998888")]
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    #[schema(example = "José Silva")]
    pub name: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[validate(length(min = 1, message = "O logradouro é obrigatório."))]
    #[schema(example = "Avenida Paulista")]
    pub street: String,
    #[validate(length(min = 1, message = "O número é obrigatório."))]
    #[schema(example = "1000")]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Sala 123")]
    pub complement: Option<String>,
    #[validate(length(min = 1, message = "O bairro é obrigatório."))]
    #[schema(example = "Bela Vista")]
    pub district: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    #[schema(example = "São Paulo")]
    pub city: String,
    #[validate(length(min = 1, message = "O estado é obrigatório."))]
    #[schema(example = "SP")]
    pub state: String,
    #[validate(length(min = 1, message = "O CEP é obrigatório."))]
    #[schema(example = "01310100")]
    pub zip_code: String,
}

// --- Revenda (unidade de persistência) ---

// Clientes e pedidos ficam embutidos: qualquer mudança em um pedido
// regrava o documento inteiro da revenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reseller {
    pub id: Uuid,
    #[schema(example = "12345678000195")]
    pub cnpj: String,
    #[schema(example = "Empresa Exemplo Ltda")]
    pub corporate_name: String,
    #[schema(example = "Exemplo Comercial")]
    pub trade_name: String,
    #[schema(example = "contato@exemplo.com.br")]
    pub email: String,
    #[serde(default)]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub clients: Vec<Client>,
    pub registered_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Reseller {
    pub fn find_client_mut(&mut self, client_id: Uuid) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == client_id)
    }

    pub fn orders(&self) -> impl Iterator<Item = &ClientOrder> {
        self.clients.iter().flat_map(|c| c.orders.iter())
    }

    pub fn orders_mut(&mut self) -> impl Iterator<Item = &mut ClientOrder> {
        self.clients.iter_mut().flat_map(|c| c.orders.iter_mut())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    #[schema(example = "12345678909")]
    pub document: String,
    #[schema(example = "Bar do Zé")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub orders: Vec<ClientOrder>,
    pub registered_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// --- Payloads de cadastro ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPhone {
    #[validate(length(min = 1, message = "O número do telefone é obrigatório."))]
    #[schema(example = "11999998888")]
    pub number: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    #[validate(length(min = 1, message = "O nome do contato é obrigatório."))]
    #[schema(example = "José Silva")]
    pub name: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReseller {
    /// Opcional: quando ausente, um novo ID é gerado.
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "O CNPJ é obrigatório."))]
    #[schema(example = "12345678000195")]
    pub cnpj: String,

    #[validate(length(min = 1, message = "A razão social é obrigatória."))]
    #[schema(example = "Empresa Exemplo Ltda")]
    pub corporate_name: String,

    #[validate(length(min = 1, message = "O nome fantasia é obrigatório."))]
    #[schema(example = "Exemplo Comercial")]
    pub trade_name: String,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "contato@exemplo.com.br")]
    pub email: String,

    #[serde(default)]
    #[validate(nested)]
    pub phones: Vec<NewPhone>,

    #[serde(default)]
    #[validate(nested)]
    pub contacts: Vec<NewContact>,

    #[serde(default)]
    #[validate(nested)]
    pub addresses: Vec<Address>,
}

impl NewReseller {
    pub fn into_reseller(self) -> Reseller {
        Reseller {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            cnpj: self.cnpj,
            corporate_name: self.corporate_name,
            trade_name: self.trade_name,
            email: self.email,
            phones: self
                .phones
                .into_iter()
                .map(|p| Phone { id: Uuid::new_v4(), number: p.number })
                .collect(),
            contacts: self
                .contacts
                .into_iter()
                .map(|c| Contact { id: Uuid::new_v4(), name: c.name, is_primary: c.is_primary })
                .collect(),
            addresses: self.addresses,
            clients: Vec::new(),
            registered_at: Utc::now(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "O documento (CPF/CNPJ) é obrigatório."))]
    #[schema(example = "12345678909")]
    pub document: String,

    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    #[schema(example = "Bar do Zé")]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,

    #[validate(nested)]
    pub address: Option<Address>,
}

impl NewClient {
    pub fn into_client(self) -> Client {
        Client {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            document: self.document,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            orders: Vec::new(),
            registered_at: Utc::now(),
            is_active: true,
        }
    }
}
