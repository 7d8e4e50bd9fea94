//! Row encoding for records and report definitions

use crate::{StoreError, StoredReport};
use deptsched_domain::{
    Attribute, AttributeHandle, AttributeValue, BuiltInAttribute, EntityKind, Field, FieldId,
    FieldKind, Filter, FilterOp, Record, ReportDefinition, ReportId, SortGroupEntry,
};
use rusqlite::{params, Connection, Row};

pub(crate) const REPORT_SELECT: &str =
    "SELECT r.id, h.label, h.created_at, r.name, r.entity_kind, r.itemized,
            r.show_grand_total, r.show_grand_total_title, r.show_grand_total_count
     FROM reports r JOIN history h ON h.id = r.history_id";

/// Raw `reports` row, decoded by [`load_report`]
pub(crate) struct ReportRow {
    id: Vec<u8>,
    label: String,
    created_at: i64,
    name: String,
    entity_kind: String,
    itemized: bool,
    show_grand_total: bool,
    show_grand_total_title: bool,
    show_grand_total_count: bool,
}

pub(crate) fn report_row(row: &Row<'_>) -> rusqlite::Result<ReportRow> {
    Ok(ReportRow {
        id: row.get(0)?,
        label: row.get(1)?,
        created_at: row.get(2)?,
        name: row.get(3)?,
        entity_kind: row.get(4)?,
        itemized: row.get(5)?,
        show_grand_total: row.get(6)?,
        show_grand_total_title: row.get(7)?,
        show_grand_total_count: row.get(8)?,
    })
}

pub(crate) fn report_id_to_bytes(id: ReportId) -> Vec<u8> {
    id.value().to_be_bytes().to_vec()
}

fn bytes_to_report_id(bytes: &[u8]) -> Result<ReportId, StoreError> {
    let arr: [u8; 16] = bytes.try_into().map_err(|_| {
        StoreError::InvalidData(format!("Expected 16 bytes for ReportId, got {}", bytes.len()))
    })?;
    Ok(ReportId::from_value(u128::from_be_bytes(arr)))
}

fn encode_value(value: &AttributeValue) -> (&'static str, Option<&str>, Option<f64>) {
    match value {
        AttributeValue::Text(s) => ("text", Some(s.as_str()), None),
        AttributeValue::Number(n) => ("number", None, Some(*n)),
        AttributeValue::Reference(s) => ("reference", Some(s.as_str()), None),
        AttributeValue::Empty => ("empty", None, None),
    }
}

fn decode_value(
    kind: &str,
    text: Option<String>,
    number: Option<f64>,
) -> Result<AttributeValue, StoreError> {
    let missing = || StoreError::InvalidData(format!("Attribute of kind '{}' has no value", kind));
    match kind {
        "text" => text.map(AttributeValue::Text).ok_or_else(missing),
        "number" => number.map(AttributeValue::Number).ok_or_else(missing),
        "reference" => text.map(AttributeValue::Reference).ok_or_else(missing),
        "empty" => Ok(AttributeValue::Empty),
        other => Err(StoreError::InvalidData(format!("Unknown value kind: {}", other))),
    }
}

pub(crate) fn write_record(conn: &Connection, record: &Record) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO records (id, kind, is_type) VALUES (?1, ?2, ?3)",
        params![record.id.value(), record.kind.as_str(), record.is_type],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO attributes (record_id, position, handle, builtin, name, value_kind, value_text, value_number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for (position, attribute) in record.attributes.iter().enumerate() {
        let (kind, text, number) = encode_value(&attribute.value);
        stmt.execute(params![
            record.id.value(),
            position as i64,
            attribute.handle.value(),
            attribute.builtin.map(|b| b.as_str()),
            &attribute.name,
            kind,
            text,
            number,
        ])?;
    }

    Ok(())
}

pub(crate) fn read_attributes(conn: &Connection, record_id: i64) -> Result<Vec<Attribute>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT handle, builtin, name, value_kind, value_text, value_number
         FROM attributes WHERE record_id = ?1 ORDER BY position",
    )?;
    let rows = stmt
        .query_map(params![record_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<f64>>(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(handle, builtin, name, kind, text, number)| {
            let builtin = builtin
                .map(|key| {
                    BuiltInAttribute::parse(&key)
                        .ok_or_else(|| StoreError::InvalidData(format!("Unknown attribute key: {}", key)))
                })
                .transpose()?;
            Ok(Attribute {
                handle: AttributeHandle::new(handle),
                builtin,
                name,
                value: decode_value(&kind, text, number)?,
            })
        })
        .collect()
}

pub(crate) fn write_report(
    conn: &Connection,
    id: ReportId,
    history_id: i64,
    definition: &ReportDefinition,
) -> Result<(), StoreError> {
    let id_bytes = report_id_to_bytes(id);

    conn.execute(
        "INSERT INTO reports (id, history_id, name, entity_kind, itemized,
                              show_grand_total, show_grand_total_title, show_grand_total_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            &id_bytes,
            history_id,
            &definition.name,
            definition.entity_kind.as_str(),
            definition.itemized,
            definition.show_grand_total,
            definition.show_grand_total_title,
            definition.show_grand_total_count,
        ],
    )?;

    let mut fields = conn.prepare(
        "INSERT INTO report_fields (report_id, position, handle, heading, kind, hidden, totals)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for field in &definition.fields {
        fields.execute(params![
            &id_bytes,
            field.id.0 as i64,
            field.handle.value(),
            &field.heading,
            field.kind.as_str(),
            field.hidden,
            field.totals,
        ])?;
    }

    let mut filters = conn.prepare(
        "INSERT INTO report_filters (report_id, position, field, op, value)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (position, filter) in definition.filters.iter().enumerate() {
        filters.execute(params![
            &id_bytes,
            position as i64,
            filter.field.0 as i64,
            filter.op.as_str(),
            &filter.value,
        ])?;
    }

    let mut groups = conn.prepare(
        "INSERT INTO report_sort_groups (report_id, position, field, show_header, show_footer, show_blank_line)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for (position, entry) in definition.sort_group.iter().enumerate() {
        groups.execute(params![
            &id_bytes,
            position as i64,
            entry.field.0 as i64,
            entry.show_header,
            entry.show_footer,
            entry.show_blank_line,
        ])?;
    }

    Ok(())
}

pub(crate) fn read_reports(conn: &Connection, name: Option<&str>) -> Result<Vec<StoredReport>, StoreError> {
    let rows = match name {
        Some(name) => {
            let mut stmt = conn.prepare(&format!("{} WHERE r.name = ?1 ORDER BY r.seq", REPORT_SELECT))?;
            let rows = stmt.query_map(params![name], report_row)?.collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(&format!("{} ORDER BY r.seq", REPORT_SELECT))?;
            let rows = stmt.query_map([], report_row)?.collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };

    rows.into_iter().map(|row| load_report(conn, row)).collect()
}

pub(crate) fn load_report(conn: &Connection, row: ReportRow) -> Result<StoredReport, StoreError> {
    let id = bytes_to_report_id(&row.id)?;
    let entity_kind = EntityKind::parse(&row.entity_kind)
        .ok_or_else(|| StoreError::InvalidData(format!("Unknown entity kind: {}", row.entity_kind)))?;

    Ok(StoredReport {
        id,
        label: row.label,
        created_at: row.created_at as u64,
        definition: ReportDefinition {
            name: row.name,
            entity_kind,
            fields: read_fields(conn, &row.id)?,
            filters: read_filters(conn, &row.id)?,
            sort_group: read_sort_groups(conn, &row.id)?,
            itemized: row.itemized,
            show_grand_total: row.show_grand_total,
            show_grand_total_title: row.show_grand_total_title,
            show_grand_total_count: row.show_grand_total_count,
        },
    })
}

fn read_fields(conn: &Connection, report_id: &[u8]) -> Result<Vec<Field>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT position, handle, heading, kind, hidden, totals
         FROM report_fields WHERE report_id = ?1 ORDER BY position",
    )?;
    let rows = stmt
        .query_map(params![report_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, bool>(4)?,
                row.get::<_, bool>(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(position, handle, heading, kind, hidden, totals)| {
            let kind = FieldKind::parse(&kind)
                .ok_or_else(|| StoreError::InvalidData(format!("Unknown field kind: {}", kind)))?;
            Ok(Field {
                id: FieldId(position as usize),
                handle: AttributeHandle::new(handle),
                heading,
                kind,
                hidden,
                totals,
            })
        })
        .collect()
}

fn read_filters(conn: &Connection, report_id: &[u8]) -> Result<Vec<Filter>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT field, op, value FROM report_filters WHERE report_id = ?1 ORDER BY position",
    )?;
    let rows = stmt
        .query_map(params![report_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(field, op, value)| {
            let op = FilterOp::parse(&op)
                .ok_or_else(|| StoreError::InvalidData(format!("Unknown filter op: {}", op)))?;
            Ok(Filter {
                field: FieldId(field as usize),
                op,
                value,
            })
        })
        .collect()
}

fn read_sort_groups(conn: &Connection, report_id: &[u8]) -> Result<Vec<SortGroupEntry>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT field, show_header, show_footer, show_blank_line
         FROM report_sort_groups WHERE report_id = ?1 ORDER BY position",
    )?;
    let entries = stmt
        .query_map(params![report_id], |row| {
            Ok(SortGroupEntry {
                field: FieldId(row.get::<_, i64>(0)? as usize),
                show_header: row.get(1)?,
                show_footer: row.get(2)?,
                show_blank_line: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
