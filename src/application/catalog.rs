//! # Extract Catalog
//!
//! 7種類の抽出定義（固定SQLと出力先分類のペア）

use crate::domain::entities::extract::{DestinationCategory, ExtractDefinition};

/// 2021年の月次課金テーブルのフルダンプ
const MONTHLY_CHARGES_SQL: &str = r#"
    SELECT *
    FROM `{project}.{dataset}.monthly_charges_2021`
"#;

/// 2022年以前に作成された組織テーブルの主要カラム
const ORGANIZATIONS_SQL: &str = r#"
    SELECT
        organization_id,
        organization_owner_id,
        created_at,
        has_active_subscription,
        current_subscription_plan,
        current_billing_period,
        first_billed_user_count,
        revenue_realized_to_date_usd,
        time_entries_count,
        billable_time_entries_count,
        hours_tracked,
        billable_hours_tracked,
        clients_used,
        projects_used,
        billable_projects_used,
        country,
        industry,
        approximate_employees,
        reported_annual_revenue
    FROM `{project}.{dataset}.organizations_before_2022`
"#;

/// 2021年の売上が0より大きい組織と、その組織情報の結合
const PAYING_ORGANIZATIONS_SQL: &str = r#"
    WITH nonzero_earners AS (
        SELECT
            organization_id,
            SUM(amount_usd) as total_revenue_2021
        FROM `{project}.{dataset}.monthly_charges_2021`
        GROUP BY 1
        HAVING SUM(amount_usd) > 0
    )

    SELECT
        a.organization_id,
        b.organization_owner_id,
        a.total_revenue_2021,
        b.revenue_realized_to_date_usd,
        b.time_entries_count,
        b.billable_time_entries_count,
        b.hours_tracked,
        b.billable_hours_tracked,
        b.clients_used,
        b.projects_used,
        b.billable_projects_used,
        b.country,
        b.industry,
        b.company_type,
        b.approximate_employees,
        b.reported_annual_revenue
    FROM nonzero_earners a
    INNER JOIN `{project}.{dataset}.organizations_before_2022` b
    ON a.organization_id = b.organization_id
    ORDER BY 3 DESC
"#;

/// 組織ごとの解約・再開・継続の回数と2021年の売上
const CHURN_NUMBERS_SQL: &str = r#"
    SELECT
        a.organization_id,
        COUNT(CASE WHEN type = 'Churned' THEN 1 ELSE NULL END) as times_churned,
        COUNT(CASE WHEN type = 'Reactivated' THEN 1 ELSE NULL END) as times_reactivated,
        COUNT(CASE WHEN type = 'Retained' THEN 1 ELSE NULL END) as times_retained,
        SUM(amount_usd) as revenue
    FROM `{project}.{dataset}.monthly_charges_2021` a
    GROUP BY 1
    ORDER BY 2 DESC, 3 ASC
"#;

/// 外れ値しきい値の外側、または最頻レンジ内の売上を持つ組織
///
/// しきい値（22000 / 90〜250）は固定の定数として扱う
const OUTLIERS_AND_MODE_SQL: &str = r#"
    WITH outlier_earners AS (
        SELECT
            organization_id,
            SUM(amount_usd) as total_revenue_2021
        FROM `{project}.{dataset}.monthly_charges_2021`
        GROUP BY 1
        HAVING (
            (SUM(amount_usd) > 22000) OR
            (SUM(amount_usd) BETWEEN 90 AND 250)
        )
    )

    SELECT
        a.organization_id,
        a.total_revenue_2021,
        b.organization_owner_id,
        b.revenue_realized_to_date_usd,
        b.time_entries_count,
        b.billable_time_entries_count,
        b.hours_tracked,
        b.billable_hours_tracked,
        b.clients_used,
        b.projects_used,
        b.billable_projects_used,
        b.country,
        b.industry,
        b.company_type,
        b.approximate_employees,
        b.reported_annual_revenue
    FROM outlier_earners a
    INNER JOIN `{project}.{dataset}.organizations_before_2022` b
    ON a.organization_id = b.organization_id
    ORDER BY 2 DESC
"#;

/// プラン別・月別・四半期別のウィンドウ集計
const GROUPBY_PLAN_SQL: &str = r#"
    WITH groupedby_plans AS (
        SELECT
            plan,
            EXTRACT(QUARTER FROM charged_on) as quarter,
            EXTRACT(MONTH FROM charged_on) as month,
            COUNT(*) as num_charges,
            SUM(CASE WHEN is_sales_driven = True THEN 1 ELSE 0 END) as num_sales_driven,
            SUM(amount_usd) as revenue
        FROM `{project}.{dataset}.monthly_charges_2021`
        GROUP BY 1,2,3
        ORDER BY 1,2,3
    )

    SELECT
        plan,
        month,
        quarter,
        SUM(num_charges) OVER (PARTITION BY plan, month) as monthly_count,
        SUM(num_charges) OVER (PARTITION BY plan, quarter) as qtr_count,
        SUM(num_charges) OVER (PARTITION BY plan) as count_by_plan,
        SUM(num_charges) OVER () as total_count,
        SUM(num_sales_driven) OVER (PARTITION BY plan, month) as monthly_sales_driven,
        SUM(num_sales_driven) OVER (PARTITION BY plan, quarter) as qtr_sales_driven,
        SUM(num_sales_driven) OVER (PARTITION BY plan) as sales_driven_by_plan,
        SUM(num_sales_driven) OVER () as total_sales_driven,
        SUM(revenue) OVER (PARTITION BY plan, month) as monthly_revenue,
        SUM(revenue) OVER (PARTITION BY plan, quarter) as qtr_revenue,
        SUM(revenue) OVER (PARTITION BY plan) as revenue_by_plan,
        SUM(revenue) OVER () as total_revenue
    FROM groupedby_plans
    ORDER BY 1,2,3
"#;

/// 課金タイプ別・月別・四半期別のウィンドウ集計
const GROUPBY_TYPE_SQL: &str = r#"
    WITH groupedby_types AS (
        SELECT
            type,
            EXTRACT(QUARTER FROM charged_on) as quarter,
            EXTRACT(MONTH FROM charged_on) as month,
            COUNT(*) as num_charges,
            SUM(CASE WHEN is_sales_driven = True THEN 1 ELSE 0 END) as num_sales_driven,
            SUM(amount_usd) as revenue
        FROM `{project}.{dataset}.monthly_charges_2021`
        GROUP BY 1,2,3
        ORDER BY 1,2,3
    )

    SELECT
        type,
        month,
        quarter,
        SUM(num_charges) OVER (PARTITION BY type, month) as monthly_count,
        SUM(num_charges) OVER (PARTITION BY type, quarter) as qtr_count,
        SUM(num_charges) OVER (PARTITION BY type) as count_by_type,
        SUM(num_charges) OVER () as total_count,
        SUM(num_sales_driven) OVER (PARTITION BY type, month) as monthly_sales_driven,
        SUM(num_sales_driven) OVER (PARTITION BY type, quarter) as qtr_sales_driven,
        SUM(num_sales_driven) OVER (PARTITION BY type) as sales_driven_by_type,
        SUM(num_sales_driven) OVER () as total_sales_driven,
        SUM(revenue) OVER (PARTITION BY type, month) as monthly_revenue,
        SUM(revenue) OVER (PARTITION BY type, quarter) as qtr_revenue,
        SUM(revenue) OVER (PARTITION BY type) as revenue_by_type,
        SUM(revenue) OVER () as total_revenue
    FROM groupedby_types
    ORDER BY 1,2,3
"#;

/// 全抽出定義のカタログ
///
/// 各抽出は互いに独立しており、任意の順序・単独で実行できる
pub const CATALOG: &[ExtractDefinition] = &[
    ExtractDefinition {
        key: "monthly_charges",
        description: "Full dump of the monthly_charges_2021 table",
        category: DestinationCategory::Raw,
        sql_template: MONTHLY_CHARGES_SQL,
    },
    ExtractDefinition {
        key: "organizations",
        description: "Relevant columns of the organizations_before_2022 table",
        category: DestinationCategory::Raw,
        sql_template: ORGANIZATIONS_SQL,
    },
    ExtractDefinition {
        key: "paying_organizations",
        description: "Organizations with more than 0 revenue in 2021, joined to org details",
        category: DestinationCategory::Processed,
        sql_template: PAYING_ORGANIZATIONS_SQL,
    },
    ExtractDefinition {
        key: "churn_numbers",
        description: "Per-organization churn / reactivation / retention counts and revenue",
        category: DestinationCategory::Processed,
        sql_template: CHURN_NUMBERS_SQL,
    },
    ExtractDefinition {
        key: "outliers_and_mode",
        description: "Organizations with earnings outside the outlier thresholds or in the mode range",
        category: DestinationCategory::Processed,
        sql_template: OUTLIERS_AND_MODE_SQL,
    },
    ExtractDefinition {
        key: "groupby_plan",
        description: "Charge counts, sales-driven counts and revenue windowed by plan/month/quarter",
        category: DestinationCategory::Processed,
        sql_template: GROUPBY_PLAN_SQL,
    },
    ExtractDefinition {
        key: "groupby_type",
        description: "Charge counts, sales-driven counts and revenue windowed by type/month/quarter",
        category: DestinationCategory::Processed,
        sql_template: GROUPBY_TYPE_SQL,
    },
];

/// キーから抽出定義を検索
pub fn find(key: &str) -> Option<&'static ExtractDefinition> {
    CATALOG.iter().find(|d| d.key == key)
}
