//! Binary encoder: IR in, wire bytes out.
//!
//! Encoding is a pure function of the plan: the same IR always yields
//! byte-identical output. The encoder follows the IR's declared order
//! everywhere and performs no normalisation of its own.

use crate::error::EncodeResult;
use crate::format;
use crate::writer::ByteWriter;
use pf_core::{
    Expr, FileFormat, FileItem, FileLocation, Literal, Measure, NamedExpr, Plan, Relation,
    RelationKind, Schema, SortField, Source, SourceKind, Type,
};

/// Encode a resolved plan into the length-prefixed binary envelope.
pub fn encode_plan(plan: &Plan) -> EncodeResult<Vec<u8>> {
    plan.validate()?;

    let mut payload = ByteWriter::new();
    payload.put_bytes(&format::MAGIC);
    payload.put_u16(format::VERSION);

    payload.put_u32(plan.schemas.len() as u32);
    for schema in &plan.schemas {
        payload.put_record(|w| write_schema(w, schema));
    }

    payload.put_u32(plan.sources.len() as u32);
    for source in &plan.sources {
        payload.put_record(|w| write_source(w, source));
    }

    payload.put_u32(plan.relations.len() as u32);
    for relation in &plan.relations {
        payload.put_record(|w| write_relation(w, relation));
    }

    payload.put_u32(plan.roots.len() as u32);
    for root in &plan.roots {
        payload.put_u32(root.0);
    }

    let payload = payload.into_bytes();
    let mut envelope = ByteWriter::new();
    envelope.put_u32(payload.len() as u32);
    envelope.put_bytes(&payload);
    envelope.put_u32(crc32fast::hash(&payload));

    log::debug!(
        "encoded plan: {} payload bytes, {} relations",
        payload.len(),
        plan.relations.len()
    );
    Ok(envelope.into_bytes())
}

fn write_schema(w: &mut ByteWriter, schema: &Schema) {
    w.put_str(&schema.name);
    w.put_u32(schema.fields.len() as u32);
    for field in &schema.fields {
        w.put_str(&field.name);
        write_type(w, &field.ty);
    }
}

fn write_source(w: &mut ByteWriter, source: &Source) {
    w.put_str(&source.name);
    match &source.kind {
        SourceKind::LocalFiles { items } => {
            w.put_u8(format::SOURCE_LOCAL_FILES);
            w.put_u32(items.len() as u32);
            for item in items {
                write_file_item(w, item);
            }
        }
        SourceKind::NamedTable { names } => {
            w.put_u8(format::SOURCE_NAMED_TABLE);
            w.put_u32(names.len() as u32);
            for name in names {
                w.put_str(name);
            }
        }
        SourceKind::VirtualTable { rows } => {
            w.put_u8(format::SOURCE_VIRTUAL_TABLE);
            w.put_u32(rows.len() as u32);
            for row in rows {
                w.put_u32(row.len() as u32);
                for literal in row {
                    write_literal(w, literal);
                }
            }
        }
        SourceKind::Extension => {
            w.put_u8(format::SOURCE_EXTENSION);
        }
    }
}

fn write_file_item(w: &mut ByteWriter, item: &FileItem) {
    let (tag, value) = match &item.location {
        FileLocation::UriFile(v) => (format::LOC_URI_FILE, v),
        FileLocation::UriPath(v) => (format::LOC_URI_PATH, v),
        FileLocation::UriPathGlob(v) => (format::LOC_URI_PATH_GLOB, v),
        FileLocation::UriFolder(v) => (format::LOC_URI_FOLDER, v),
    };
    w.put_u8(tag);
    w.put_str(value);
    write_opt_u64(w, item.partition_index);
    write_opt_u64(w, item.start);
    write_opt_u64(w, item.length);
    match item.format {
        None => w.put_bool(false),
        Some(FileFormat::Parquet) => {
            w.put_bool(true);
            w.put_u8(format::FILE_FORMAT_PARQUET);
        }
        Some(FileFormat::Orc) => {
            w.put_bool(true);
            w.put_u8(format::FILE_FORMAT_ORC);
        }
    }
}

fn write_relation(w: &mut ByteWriter, relation: &Relation) {
    w.put_str(&relation.name);
    match &relation.kind {
        RelationKind::Read { schema, source } => {
            w.put_u8(format::REL_READ);
            w.put_u32(schema.0);
            w.put_u32(source.0);
        }
        RelationKind::Filter { input, condition } => {
            w.put_u8(format::REL_FILTER);
            w.put_u32(input.0);
            write_expr(w, condition);
        }
        RelationKind::Project {
            input,
            expressions,
            emits,
        } => {
            w.put_u8(format::REL_PROJECT);
            w.put_u32(input.0);
            w.put_u32(expressions.len() as u32);
            for NamedExpr { expr, name } in expressions {
                write_expr(w, expr);
                write_opt_str(w, name.as_deref());
            }
            w.put_u32(emits.len() as u32);
            for emit in emits {
                w.put_str(emit);
            }
        }
        RelationKind::Join {
            left,
            right,
            join_type,
            condition,
        } => {
            w.put_u8(format::REL_JOIN);
            w.put_u32(left.0);
            w.put_u32(right.0);
            w.put_u8(join_type.tag());
            match condition {
                None => w.put_bool(false),
                Some(expr) => {
                    w.put_bool(true);
                    write_expr(w, expr);
                }
            }
        }
        RelationKind::Aggregate {
            input,
            groupings,
            measures,
        } => {
            w.put_u8(format::REL_AGGREGATE);
            w.put_u32(input.0);
            w.put_u32(groupings.len() as u32);
            for grouping in groupings {
                write_expr(w, grouping);
            }
            w.put_u32(measures.len() as u32);
            for Measure {
                expr,
                output_type,
                name,
            } in measures
            {
                write_expr(w, expr);
                write_opt_type(w, output_type.as_ref());
                write_opt_str(w, name.as_deref());
            }
        }
        RelationKind::Sort { input, fields } => {
            w.put_u8(format::REL_SORT);
            w.put_u32(input.0);
            w.put_u32(fields.len() as u32);
            for SortField { expr, direction } in fields {
                write_expr(w, expr);
                match direction {
                    None => w.put_bool(false),
                    Some(dir) => {
                        w.put_bool(true);
                        w.put_u8(dir.tag());
                    }
                }
            }
        }
    }
}

fn write_type(w: &mut ByteWriter, ty: &Type) {
    match ty {
        Type::Simple {
            kind,
            nullable,
            params,
        } => {
            w.put_u8(format::TYPE_SIMPLE);
            w.put_u8(kind.tag());
            w.put_bool(*nullable);
            w.put_u32(params.len() as u32);
            for param in params {
                w.put_u32(*param);
            }
        }
        Type::List { nullable, element } => {
            w.put_u8(format::TYPE_LIST);
            w.put_bool(*nullable);
            write_type(w, element);
        }
        Type::Map {
            nullable,
            key,
            value,
        } => {
            w.put_u8(format::TYPE_MAP);
            w.put_bool(*nullable);
            write_type(w, key);
            write_type(w, value);
        }
        Type::Struct { nullable, fields } => {
            w.put_u8(format::TYPE_STRUCT);
            w.put_bool(*nullable);
            w.put_u32(fields.len() as u32);
            for field in fields {
                write_type(w, field);
            }
        }
    }
}

fn write_opt_type(w: &mut ByteWriter, ty: Option<&Type>) {
    match ty {
        None => w.put_bool(false),
        Some(ty) => {
            w.put_bool(true);
            write_type(w, ty);
        }
    }
}

fn write_opt_str(w: &mut ByteWriter, value: Option<&str>) {
    match value {
        None => w.put_bool(false),
        Some(value) => {
            w.put_bool(true);
            w.put_str(value);
        }
    }
}

fn write_opt_u64(w: &mut ByteWriter, value: Option<u64>) {
    match value {
        None => w.put_bool(false),
        Some(value) => {
            w.put_bool(true);
            w.put_u64(value);
        }
    }
}

fn write_literal(w: &mut ByteWriter, literal: &Literal) {
    match literal {
        Literal::Null(ty) => {
            w.put_u8(format::LIT_NULL);
            write_opt_type(w, ty.as_ref());
        }
        Literal::Bool(value) => {
            w.put_u8(format::LIT_BOOL);
            w.put_bool(*value);
        }
        Literal::Integer { value, ty } => {
            w.put_u8(format::LIT_INTEGER);
            w.put_i64(*value);
            write_opt_type(w, ty.as_ref());
        }
        Literal::Float { value, ty } => {
            w.put_u8(format::LIT_FLOAT);
            w.put_f64(*value);
            write_opt_type(w, ty.as_ref());
        }
        Literal::String { value, ty } => {
            w.put_u8(format::LIT_STRING);
            w.put_str(value);
            write_opt_type(w, ty.as_ref());
        }
    }
}

fn write_expr(w: &mut ByteWriter, expr: &Expr) {
    match expr {
        Expr::Literal(literal) => {
            w.put_u8(format::EXPR_LITERAL);
            write_literal(w, literal);
        }
        Expr::Column { qualifier, name } => {
            w.put_u8(format::EXPR_COLUMN);
            write_opt_str(w, qualifier.as_deref());
            w.put_str(name);
        }
        Expr::Call {
            function,
            args,
            output_type,
        } => {
            w.put_u8(format::EXPR_CALL);
            w.put_str(function);
            w.put_u32(args.len() as u32);
            for arg in args {
                write_expr(w, arg);
            }
            write_opt_type(w, output_type.as_ref());
        }
        Expr::Cast { expr, ty } => {
            w.put_u8(format::EXPR_CAST);
            write_expr(w, expr);
            write_type(w, ty);
        }
    }
}

#[cfg(test)]
#[path = "encode_test.rs"]
mod tests;
