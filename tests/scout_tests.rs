// End-to-end runs of the scout pipeline against saved product pages.
//
// Pages are served through SnapshotPage so no Chrome install is needed.

use chrono::NaiveDate;
use product_scout::config::WaitConfig;
use product_scout::format::FixedClock;
use product_scout::models::COLUMNS;
use product_scout::scrapers::SnapshotPage;
use product_scout::storage::{load_table, Table};
use product_scout::{run, Availability, ProductRecord, ScoutConfig, ScoutError};
use std::path::Path;
use tempfile::tempdir;

const URL: &str =
    "https://www.gsuplementos.com.br/creatina-monohidratada-250gr-growth-supplements-p985931";

fn product_page(buy_button: bool) -> String {
    let button = if buy_button {
        r#"<div class="botao-de-compra"><button class="botaoComprar">Comprar</button></div>"#
    } else {
        r#"<div class="botao-de-compra"><span class="avise-me">Avise-me</span></div>"#
    };

    format!(
        r#"
        <html lang="pt-BR">
            <body>
                <div class="topoDetalhe-boxRight">
                    <h1 class="topoDetalhe-boxRight-nome">Creatina Monohidratada 250g</h1>
                    <span class="topoDetalhe-boxRight-precoDe show-for-large">R$ 89,90</span>
                    {button}
                </div>
            </body>
        </html>
        "#
    )
}

fn test_config() -> ScoutConfig {
    ScoutConfig {
        product_url: URL.to_string(),
        wait: WaitConfig {
            timeout_ms: 50,
            poll_interval_ms: 10,
        },
        ..ScoutConfig::default()
    }
}

fn clock(minute: u32) -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(8, minute, 9)
            .unwrap(),
    )
}

fn scrape_into(path: &Path, buy_button: bool, minute: u32) -> product_scout::Result<ProductRecord> {
    let page = SnapshotPage::from_html(&product_page(buy_button));
    run(&test_config(), &page, &clock(minute), path)
}

#[test]
fn test_end_to_end_available_product() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.xlsx");

    let record = scrape_into(&path, true, 5)?;

    assert_eq!(
        record,
        ProductRecord {
            description: "Creatina Monohidratada 250g".to_string(),
            price: "89.90".to_string(),
            captured_at: "07/03/2024 08:05:09".to_string(),
            availability: Availability::Available,
            url: URL.to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_first_run_creates_single_row_workbook() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.xlsx");

    let record = scrape_into(&path, true, 5)?;
    let table = load_table(&path)?.expect("workbook should exist");

    assert_eq!(table.headers, COLUMNS.to_vec());
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0], record.to_row().to_vec());
    Ok(())
}

#[test]
fn test_reruns_append_duplicate_rows() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.xlsx");

    scrape_into(&path, true, 5)?;
    scrape_into(&path, false, 6)?;
    let before = load_table(&path)?.expect("workbook should exist");

    let record = scrape_into(&path, true, 7)?;
    let after = load_table(&path)?.expect("workbook should exist");

    assert_eq!(after.headers, before.headers);
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after.rows[..before.len()], &before.rows[..]);
    assert_eq!(after.rows[before.len()], record.to_row().to_vec());

    // Same URL every time, no deduplication
    assert!(after.rows.iter().all(|row| row[4] == URL));
    assert_eq!(after.rows[1][3], "NÃO");
    Ok(())
}

#[test]
fn test_missing_buy_button_is_nao() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.csv");

    let record = scrape_into(&path, false, 5)?;

    assert_eq!(record.availability, Availability::Unavailable);
    let table = load_table(&path)?.expect("csv should exist");
    assert_eq!(table.rows[0][3], "NÃO");
    Ok(())
}

#[test]
fn test_missing_title_persists_nothing() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.xlsx");
    let page = SnapshotPage::from_html("<html><body><p>Página não encontrada</p></body></html>");

    let result = run(&test_config(), &page, &clock(5), &path);

    assert!(matches!(result, Err(ScoutError::ElementTimeout { .. })));
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_corrupt_output_is_not_overwritten() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.xlsx");
    std::fs::write(&path, b"not a workbook")?;

    let result = scrape_into(&path, true, 5);

    assert!(matches!(result, Err(ScoutError::Load { .. })));
    assert_eq!(std::fs::read(&path)?, b"not a workbook");
    Ok(())
}

#[test]
fn test_existing_table_column_order_is_kept() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dados.csv");
    std::fs::write(
        &path,
        "Link do Produto,Preço,Descrição do Item,Data Hora,Disponível para Compra?\n\
         https://old,10.00,Antigo,01/01/2024 00:00:00,SIM\n",
    )?;

    scrape_into(&path, true, 5)?;
    let table: Table = load_table(&path)?.expect("csv should exist");

    assert_eq!(table.headers[0], "Link do Produto");
    assert_eq!(
        table.rows[0],
        vec!["https://old", "10.00", "Antigo", "01/01/2024 00:00:00", "SIM"]
    );
    assert_eq!(
        table.rows[1],
        vec![URL, "89.90", "Creatina Monohidratada 250g", "07/03/2024 08:05:09", "SIM"]
    );
    Ok(())
}

#[test]
fn test_unknown_output_format_fails_before_scraping() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dados.json");

    let result = scrape_into(&path, true, 5);

    assert!(matches!(result, Err(ScoutError::UnsupportedFormat { .. })));
    assert!(!path.exists());
}
