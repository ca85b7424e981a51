//! 平均報酬聚合

use chrono::NaiveDate;
use polars::prelude::*;

use crate::domain_types::{ColumnName, ReturnFrameExt};
use crate::error::{DashboardError, DashboardResult};

// 0001-01-01 至 1970-01-01 的天數
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// 單一機構的平均報酬
#[derive(Debug, Clone, PartialEq)]
pub struct EntityReturn {
    pub entity: String,
    pub mean_return: f64,
}

/// 單一日期的平均報酬
#[derive(Debug, Clone, PartialEq)]
pub struct DateReturn {
    pub date: NaiveDate,
    pub mean_return: f64,
}

fn mean_return() -> Expr {
    col(ColumnName::DAILY_RETURN).mean().alias(ColumnName::MEAN_RETURN)
}

/// 依機構名稱計算平均日報酬，由高至低排序
///
/// 輸入須已完成報酬欄位轉換。平均值相同時依機構名稱排序；
/// 全為空值的群組不列入結果。
pub fn mean_return_by_entity(df: &DataFrame) -> DashboardResult<Vec<EntityReturn>> {
    df.require_column(ColumnName::ENTITY_NAME)?;
    df.require_column(ColumnName::DAILY_RETURN)?;

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(ColumnName::ENTITY_NAME).cast(DataType::String)])
        .agg([mean_return()])
        .drop_nulls(None)
        .sort(
            [ColumnName::MEAN_RETURN, ColumnName::ENTITY_NAME],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let entities = grouped.column(ColumnName::ENTITY_NAME)?.str()?;
    let means = grouped.column(ColumnName::MEAN_RETURN)?.f64()?;

    Ok(entities
        .into_iter()
        .zip(means)
        .filter_map(|(entity, mean)| {
            Some(EntityReturn {
                entity: entity?.to_string(),
                mean_return: mean?,
            })
        })
        .collect())
}

/// 依截止日期計算平均日報酬，依時間先後排序
///
/// 輸入須已完成日期與報酬欄位轉換。
pub fn mean_return_by_date(df: &DataFrame) -> DashboardResult<Vec<DateReturn>> {
    df.require_column(ColumnName::CUT_OFF_DATE)?;
    df.require_column(ColumnName::DAILY_RETURN)?;

    let date_dtype = df.column(ColumnName::CUT_OFF_DATE)?.dtype();
    if date_dtype != &DataType::Date {
        return Err(DashboardError::Coercion {
            column: ColumnName::CUT_OFF_DATE.to_string(),
            reason: format!("預期日期型別，實際為 {:?}", date_dtype),
        });
    }

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(ColumnName::CUT_OFF_DATE)])
        .agg([mean_return()])
        .drop_nulls(None)
        .sort([ColumnName::CUT_OFF_DATE], SortMultipleOptions::default())
        .collect()?;

    let days = grouped.column(ColumnName::CUT_OFF_DATE)?.cast(&DataType::Int32)?;
    let means = grouped.column(ColumnName::MEAN_RETURN)?.f64()?;

    Ok(days
        .i32()?
        .into_iter()
        .zip(means)
        .filter_map(|(day, mean)| {
            Some(DateReturn {
                date: NaiveDate::from_num_days_from_ce_opt(day? + UNIX_EPOCH_DAYS_FROM_CE)?,
                mean_return: mean?,
            })
        })
        .collect())
}
