//! Binary decoder: wire bytes in, IR out.
//!
//! Structurally validates the envelope (length prefix, checksum, magic,
//! version) and every length-prefixed record before reconstructing the
//! plan. Reconstruction is all-or-nothing: any failure leaves nothing
//! behind, and the final plan passes the same structural validation the
//! encoder requires.

use crate::error::{DecodeError, DecodeResult};
use crate::format;
use crate::reader::ByteReader;
use pf_core::{
    Expr, Field, FileFormat, FileItem, FileLocation, JoinType, Literal, Measure, NamedExpr, Plan,
    PrimitiveKind, Relation, RelationId, RelationKind, Schema, SchemaId, SortDirection, SortField,
    Source, SourceId, SourceKind, Type,
};

/// Decode a binary envelope back into a validated plan.
pub fn decode_plan(bytes: &[u8]) -> DecodeResult<Plan> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyBuffer);
    }

    let mut envelope = ByteReader::new(bytes);
    let declared = envelope.get_u32()? as usize;
    let actual = envelope.remaining().saturating_sub(4);
    if declared != actual {
        return Err(DecodeError::LengthMismatch { declared, actual });
    }
    let payload = envelope.get_bytes(declared)?;
    let stored = envelope.get_u32()?;
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(DecodeError::ChecksumMismatch { stored, computed });
    }

    let mut r = ByteReader::new(payload);
    if r.get_bytes(4)? != format::MAGIC {
        return Err(DecodeError::BadMagic);
    }
    let version = r.get_u16()?;
    if version != format::VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    let schema_count = r.get_u32()?;
    let mut schemas = Vec::with_capacity(schema_count as usize);
    for _ in 0..schema_count {
        let mut record = r.get_record()?;
        schemas.push(read_schema(&mut record)?);
        record.expect_empty("schema")?;
    }

    let source_count = r.get_u32()?;
    let mut sources = Vec::with_capacity(source_count as usize);
    for _ in 0..source_count {
        let mut record = r.get_record()?;
        sources.push(read_source(&mut record)?);
        record.expect_empty("source")?;
    }

    let relation_count = r.get_u32()?;
    let mut relations = Vec::with_capacity(relation_count as usize);
    for _ in 0..relation_count {
        let mut record = r.get_record()?;
        relations.push(read_relation(&mut record)?);
        record.expect_empty("relation")?;
    }

    let root_count = r.get_u32()?;
    let mut roots = Vec::with_capacity(root_count as usize);
    for _ in 0..root_count {
        roots.push(RelationId(r.get_u32()?));
    }
    r.expect_empty("payload")?;

    let plan = Plan {
        schemas,
        sources,
        relations,
        roots,
    };
    plan.validate()?;

    log::debug!(
        "decoded plan: {} payload bytes, {} relations",
        declared,
        plan.relations.len()
    );
    Ok(plan)
}

fn read_schema(r: &mut ByteReader<'_>) -> DecodeResult<Schema> {
    let name = r.get_str()?;
    let field_count = r.get_u32()?;
    let mut fields = Vec::with_capacity(field_count as usize);
    for _ in 0..field_count {
        let field_name = r.get_str()?;
        let ty = read_type(r)?;
        fields.push(Field {
            name: field_name,
            ty,
        });
    }
    Ok(Schema { name, fields })
}

fn read_source(r: &mut ByteReader<'_>) -> DecodeResult<Source> {
    let name = r.get_str()?;
    let tag = r.get_u8()?;
    let kind = match tag {
        format::SOURCE_LOCAL_FILES => {
            let count = r.get_u32()?;
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(read_file_item(r)?);
            }
            SourceKind::LocalFiles { items }
        }
        format::SOURCE_NAMED_TABLE => {
            let count = r.get_u32()?;
            let mut names = Vec::with_capacity(count as usize);
            for _ in 0..count {
                names.push(r.get_str()?);
            }
            SourceKind::NamedTable { names }
        }
        format::SOURCE_VIRTUAL_TABLE => {
            let row_count = r.get_u32()?;
            let mut rows = Vec::with_capacity(row_count as usize);
            for _ in 0..row_count {
                let cell_count = r.get_u32()?;
                let mut row = Vec::with_capacity(cell_count as usize);
                for _ in 0..cell_count {
                    row.push(read_literal(r)?);
                }
                rows.push(row);
            }
            SourceKind::VirtualTable { rows }
        }
        format::SOURCE_EXTENSION => SourceKind::Extension,
        tag => {
            return Err(DecodeError::UnknownTag {
                what: "source",
                tag,
            })
        }
    };
    Ok(Source { name, kind })
}

fn read_file_item(r: &mut ByteReader<'_>) -> DecodeResult<FileItem> {
    let tag = r.get_u8()?;
    let value = r.get_str()?;
    let location = match tag {
        format::LOC_URI_FILE => FileLocation::UriFile(value),
        format::LOC_URI_PATH => FileLocation::UriPath(value),
        format::LOC_URI_PATH_GLOB => FileLocation::UriPathGlob(value),
        format::LOC_URI_FOLDER => FileLocation::UriFolder(value),
        tag => {
            return Err(DecodeError::UnknownTag {
                what: "file location",
                tag,
            })
        }
    };
    let partition_index = read_opt_u64(r)?;
    let start = read_opt_u64(r)?;
    let length = read_opt_u64(r)?;
    let format = if r.get_bool("file format")? {
        Some(match r.get_u8()? {
            format::FILE_FORMAT_PARQUET => FileFormat::Parquet,
            format::FILE_FORMAT_ORC => FileFormat::Orc,
            tag => {
                return Err(DecodeError::UnknownTag {
                    what: "file format",
                    tag,
                })
            }
        })
    } else {
        None
    };
    Ok(FileItem {
        location,
        partition_index,
        start,
        length,
        format,
    })
}

fn read_relation(r: &mut ByteReader<'_>) -> DecodeResult<Relation> {
    let name = r.get_str()?;
    let tag = r.get_u8()?;
    let kind = match tag {
        format::REL_READ => RelationKind::Read {
            schema: SchemaId(r.get_u32()?),
            source: SourceId(r.get_u32()?),
        },
        format::REL_FILTER => RelationKind::Filter {
            input: RelationId(r.get_u32()?),
            condition: read_expr(r)?,
        },
        format::REL_PROJECT => {
            let input = RelationId(r.get_u32()?);
            let expr_count = r.get_u32()?;
            let mut expressions = Vec::with_capacity(expr_count as usize);
            for _ in 0..expr_count {
                let expr = read_expr(r)?;
                let name = read_opt_str(r)?;
                expressions.push(NamedExpr { expr, name });
            }
            let emit_count = r.get_u32()?;
            let mut emits = Vec::with_capacity(emit_count as usize);
            for _ in 0..emit_count {
                emits.push(r.get_str()?);
            }
            RelationKind::Project {
                input,
                expressions,
                emits,
            }
        }
        format::REL_JOIN => {
            let left = RelationId(r.get_u32()?);
            let right = RelationId(r.get_u32()?);
            let join_tag = r.get_u8()?;
            let join_type = JoinType::from_tag(join_tag).ok_or(DecodeError::UnknownTag {
                what: "join type",
                tag: join_tag,
            })?;
            let condition = if r.get_bool("join condition")? {
                Some(read_expr(r)?)
            } else {
                None
            };
            RelationKind::Join {
                left,
                right,
                join_type,
                condition,
            }
        }
        format::REL_AGGREGATE => {
            let input = RelationId(r.get_u32()?);
            let grouping_count = r.get_u32()?;
            let mut groupings = Vec::with_capacity(grouping_count as usize);
            for _ in 0..grouping_count {
                groupings.push(read_expr(r)?);
            }
            let measure_count = r.get_u32()?;
            let mut measures = Vec::with_capacity(measure_count as usize);
            for _ in 0..measure_count {
                let expr = read_expr(r)?;
                let output_type = read_opt_type(r)?;
                let name = read_opt_str(r)?;
                measures.push(Measure {
                    expr,
                    output_type,
                    name,
                });
            }
            RelationKind::Aggregate {
                input,
                groupings,
                measures,
            }
        }
        format::REL_SORT => {
            let input = RelationId(r.get_u32()?);
            let field_count = r.get_u32()?;
            let mut fields = Vec::with_capacity(field_count as usize);
            for _ in 0..field_count {
                let expr = read_expr(r)?;
                let direction = if r.get_bool("sort direction")? {
                    let dir_tag = r.get_u8()?;
                    Some(
                        SortDirection::from_tag(dir_tag).ok_or(DecodeError::UnknownTag {
                            what: "sort direction",
                            tag: dir_tag,
                        })?,
                    )
                } else {
                    None
                };
                fields.push(SortField { expr, direction });
            }
            RelationKind::Sort { input, fields }
        }
        tag => {
            return Err(DecodeError::UnknownTag {
                what: "relation",
                tag,
            })
        }
    };
    Ok(Relation { name, kind })
}

fn read_type(r: &mut ByteReader<'_>) -> DecodeResult<Type> {
    let tag = r.get_u8()?;
    match tag {
        format::TYPE_SIMPLE => {
            let kind_tag = r.get_u8()?;
            let kind = PrimitiveKind::from_tag(kind_tag).ok_or(DecodeError::UnknownTag {
                what: "primitive type",
                tag: kind_tag,
            })?;
            let nullable = r.get_bool("type nullability")?;
            let param_count = r.get_u32()?;
            let mut params = Vec::with_capacity(param_count as usize);
            for _ in 0..param_count {
                params.push(r.get_u32()?);
            }
            Ok(Type::Simple {
                kind,
                nullable,
                params,
            })
        }
        format::TYPE_LIST => Ok(Type::List {
            nullable: r.get_bool("type nullability")?,
            element: Box::new(read_type(r)?),
        }),
        format::TYPE_MAP => Ok(Type::Map {
            nullable: r.get_bool("type nullability")?,
            key: Box::new(read_type(r)?),
            value: Box::new(read_type(r)?),
        }),
        format::TYPE_STRUCT => {
            let nullable = r.get_bool("type nullability")?;
            let field_count = r.get_u32()?;
            let mut fields = Vec::with_capacity(field_count as usize);
            for _ in 0..field_count {
                fields.push(read_type(r)?);
            }
            Ok(Type::Struct { nullable, fields })
        }
        tag => Err(DecodeError::UnknownTag { what: "type", tag }),
    }
}

fn read_opt_type(r: &mut ByteReader<'_>) -> DecodeResult<Option<Type>> {
    if r.get_bool("optional type")? {
        Ok(Some(read_type(r)?))
    } else {
        Ok(None)
    }
}

fn read_opt_str(r: &mut ByteReader<'_>) -> DecodeResult<Option<String>> {
    if r.get_bool("optional string")? {
        Ok(Some(r.get_str()?))
    } else {
        Ok(None)
    }
}

fn read_opt_u64(r: &mut ByteReader<'_>) -> DecodeResult<Option<u64>> {
    if r.get_bool("optional integer")? {
        Ok(Some(r.get_u64()?))
    } else {
        Ok(None)
    }
}

fn read_literal(r: &mut ByteReader<'_>) -> DecodeResult<Literal> {
    let tag = r.get_u8()?;
    match tag {
        format::LIT_NULL => Ok(Literal::Null(read_opt_type(r)?)),
        format::LIT_BOOL => Ok(Literal::Bool(r.get_bool("boolean literal")?)),
        format::LIT_INTEGER => Ok(Literal::Integer {
            value: r.get_i64()?,
            ty: read_opt_type(r)?,
        }),
        format::LIT_FLOAT => Ok(Literal::Float {
            value: r.get_f64()?,
            ty: read_opt_type(r)?,
        }),
        format::LIT_STRING => Ok(Literal::String {
            value: r.get_str()?,
            ty: read_opt_type(r)?,
        }),
        tag => Err(DecodeError::UnknownTag {
            what: "literal",
            tag,
        }),
    }
}

fn read_expr(r: &mut ByteReader<'_>) -> DecodeResult<Expr> {
    let tag = r.get_u8()?;
    match tag {
        format::EXPR_LITERAL => Ok(Expr::Literal(read_literal(r)?)),
        format::EXPR_COLUMN => Ok(Expr::Column {
            qualifier: read_opt_str(r)?,
            name: r.get_str()?,
        }),
        format::EXPR_CALL => {
            let function = r.get_str()?;
            let arg_count = r.get_u32()?;
            let mut args = Vec::with_capacity(arg_count as usize);
            for _ in 0..arg_count {
                args.push(read_expr(r)?);
            }
            let output_type = read_opt_type(r)?;
            Ok(Expr::Call {
                function,
                args,
                output_type,
            })
        }
        format::EXPR_CAST => Ok(Expr::Cast {
            expr: Box::new(read_expr(r)?),
            ty: read_type(r)?,
        }),
        tag => Err(DecodeError::UnknownTag {
            what: "expression",
            tag,
        }),
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
