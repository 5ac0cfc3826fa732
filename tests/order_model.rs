use pdmgen::dialect::Dialect;
use pdmgen::generator::{render_table, GenerateError, Generator, GeneratorConfig};
use pdmgen::parser::{parse_document, Diagnostic, Parser};
use pdmgen::typemap::Outcome;
use pretty_assertions::assert_eq;

const ORDER_MODEL: &str = include_str!("fixtures/order.pdm");

#[test]
fn test_schema_shape() {
    let schema = parse_document(ORDER_MODEL).unwrap();

    assert_eq!(schema.db, Dialect::Oracle);

    let tables: Vec<&str> = schema.tables.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(tables, vec!["oc_customer", "oc_order"]);

    let sequences: Vec<&str> = schema.sequences.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(sequences, vec!["seq_customer", "seq_order"]);

    let order = schema.find_table("OC_ORDER").unwrap();
    assert_eq!(order.name, "Order");
    assert_eq!(order.comment, "Customer orders");
    assert_eq!(order.columns.len(), 5);
    assert_eq!(order.primary_key.as_ref().unwrap().code, "pk_oc_order");
    assert_eq!(order.primary_key_column().unwrap().code, "id");

    let keys: Vec<&str> = order.keys.iter().map(|k| k.code.as_str()).collect();
    assert_eq!(keys, vec!["uk_cust_id_statusoc_order"]);

    let indexes: Vec<&str> = order.indexes.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(indexes, vec!["idx_oc_order_created", "uk_amountoc_order"]);
}

#[test]
fn test_parsing_is_deterministic() {
    assert_eq!(parse_document(ORDER_MODEL).unwrap(), parse_document(ORDER_MODEL).unwrap());
}

#[test]
fn test_orphan_index_is_reported() {
    let (_, diagnostics) = Parser::new(ORDER_MODEL).unwrap().parse_with_diagnostics().unwrap();
    assert_eq!(
        diagnostics,
        vec![Diagnostic::EmptyIndexDropped {
            table: "oc_order".to_string(),
            index: "o21".to_string(),
        }]
    );
}

#[test]
fn test_order_as_mysql() {
    let ddl = render_table(ORDER_MODEL, "oc_order", Dialect::MySql, GeneratorConfig::default()).unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE `oc_order` (
  `id` decimal(19) NOT NULL,
  `status` varchar(20) COMMENT 'Order status',
  `cust_id` bigint NOT NULL COMMENT 'Customer',
  `created_date` datetime,
  `amount` decimal(12, 2) COMMENT 'Amount',
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_cust_id_statusoc_order`(`cust_id`, `status`),
  KEY `idx_oc_order_created`(`created_date`),
  UNIQUE KEY `uk_amountoc_order`(`amount`)
) COMMENT 'Order';"
    );
}

#[test]
fn test_order_as_oracle() {
    let ddl = render_table(ORDER_MODEL, "oc_order", Dialect::Oracle, GeneratorConfig::default()).unwrap();
    assert_eq!(
        ddl,
        r#"CREATE TABLE "oc_order" (
  "id" number(19) NOT NULL,
  "status" varchar2(20),
  "cust_id" number(10) NOT NULL,
  "created_date" date,
  "amount" number(12,2),
  CONSTRAINT "pk_oc_order" PRIMARY KEY ("id"),
  CONSTRAINT "uk_cust_id_statusoc_order" UNIQUE ("cust_id", "status")
);

COMMENT ON TABLE "oc_order" IS 'Order';
COMMENT ON COLUMN "oc_order"."status" IS 'Order status';
COMMENT ON COLUMN "oc_order"."cust_id" IS 'Customer';
COMMENT ON COLUMN "oc_order"."amount" IS 'Amount';
CREATE INDEX "idx_oc_order_created" ON "oc_order"("created_date");
CREATE UNIQUE INDEX "uk_amountoc_order" ON "oc_order"("amount");"#
    );
}

#[test]
fn test_customer_as_mysql() {
    let ddl = render_table(ORDER_MODEL, "oc_customer", Dialect::MySql, GeneratorConfig::default()).unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE `oc_customer` (
  `customer_id` int NOT NULL,
  `full_name` nvarchar(64) COMMENT 'Full name',
  `raw_token` binary(16) COMMENT 'Opaque login token',
  PRIMARY KEY (`customer_id`)
);"
    );
}

#[test]
fn test_customer_as_java() {
    let java = render_table(ORDER_MODEL, "oc_customer", Dialect::Java, GeneratorConfig::default()).unwrap();
    assert_eq!(
        java,
        "import java.io.Serializable;
import javax.persistence.Id;
import lombok.Data;

@Data
public class OcCustomer implements Serializable {
  private static final long serialVersionUID = 1L;

  @Id
  private Integer customerId;
  /** Full name */
  private String fullName;
  /** Opaque login token */
  private String rawToken;
}"
    );
}

#[test]
fn test_unknown_table() {
    let err = render_table(ORDER_MODEL, "oc_invoice", Dialect::MySql, GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, GenerateError::UnknownTable(ref code) if code == "oc_invoice"));
}

#[test]
fn test_generator_memoizes_column_types() {
    let schema = parse_document(ORDER_MODEL).unwrap();
    let generator = Generator::default();
    let order = schema.find_table("oc_order").unwrap();

    let first = generator.generate(order, schema.db, Dialect::MySql);
    let mapper = generator.mapping().mapper(Dialect::Oracle, Dialect::MySql).unwrap();
    assert_eq!(mapper.cached("number(10)").as_deref(), Some("bigint"));

    let again = generator
        .mapping()
        .convert_checked(Dialect::Oracle, Dialect::MySql, "number(10)");
    assert_eq!(again.outcome, Outcome::Lookup);
    assert_eq!(generator.generate(order, schema.db, Dialect::MySql), first);
}
