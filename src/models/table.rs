// src/models/table.rs

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Valor bruto de uma célula, do jeito que chega da planilha convertida.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    // null, booleanos, objetos... tudo vira "sem valor"
    Blank(IgnoredAny),
}

// Célula sem valor volta como `null`
impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Blank(_) => serializer.serialize_none(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// Uma linha da tabela: nome da coluna -> célula.
///
/// Os cabeçalhos são normalizados com `trim`. Uma linha que não seja um objeto
/// JSON vira uma linha vazia (todos os campos zerados) em vez de derrubar a
/// tabela inteira.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(BTreeMap<String, CellValue>);

impl Row {
    pub fn from_cells<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CellValue>,
    {
        Row(cells
            .into_iter()
            .map(|(header, value)| (header.as_ref().trim().to_string(), value.into()))
            .collect())
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.0.get(header)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(header, value)| (header.as_str(), value))
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawRow {
            Cells(BTreeMap<String, CellValue>),
            Malformed(IgnoredAny),
        }

        match RawRow::deserialize(deserializer)? {
            RawRow::Cells(cells) => Ok(Row::from_cells(cells)),
            RawRow::Malformed(_) => {
                tracing::debug!("Linha malformada recebida; tratada como linha zerada.");
                Ok(Row::default())
            }
        }
    }
}

/// Sequência ordenada de linhas (ordem da planilha, não necessariamente por semana).
pub type Table = Vec<Row>;

// Posições fixas das sub-tabelas enviadas pelo front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSlot {
    Weekly,
    Weekday,
    Hourly,
}

impl TableSlot {
    pub fn key(self) -> &'static str {
        match self {
            TableSlot::Weekly => "table1",
            TableSlot::Weekday => "table2",
            TableSlot::Hourly => "table3",
        }
    }
}

/// Snapshot somente-leitura das tabelas carregadas (`table1`..`table5`).
///
/// Uma posição que não seja uma lista (`null` antes do upload, objeto, ...)
/// é tratada como ausente; o gráfico correspondente cai na série padrão.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook(BTreeMap<String, Table>);

impl<'de> Deserialize<'de> for Workbook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSlot {
            Rows(Table),
            Absent(IgnoredAny),
        }

        let slots = Option::<BTreeMap<String, RawSlot>>::deserialize(deserializer)?.unwrap_or_default();
        let tables = slots
            .into_iter()
            .filter_map(|(key, slot)| match slot {
                RawSlot::Rows(rows) => Some((key, rows)),
                RawSlot::Absent(_) => {
                    tracing::debug!("Sub-tabela {} não é uma lista; tratada como ausente.", key);
                    None
                }
            })
            .collect();

        Ok(Workbook(tables))
    }
}

impl Workbook {
    #[cfg(test)]
    pub fn with_table(mut self, slot: TableSlot, rows: Table) -> Self {
        self.0.insert(slot.key().to_string(), rows);
        self
    }

    pub fn table(&self, slot: TableSlot) -> Option<&[Row]> {
        self.0.get(slot.key()).map(Vec::as_slice)
    }
}
