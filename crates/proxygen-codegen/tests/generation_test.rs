//! End-to-end generation tests against a saved API description model.
//!
//! Tests the complete workflow:
//! 1. Parse the fixture model (proxygen-core)
//! 2. Generate the file set (proxygen-codegen)
//! 3. Verify paths, policies and rendered content

use proxygen_codegen::{
    FileKind, GeneratedCode, GeneratedFile, GeneratorOptions, OutputLayout, ProxyGenerator,
    WritePolicy,
};
use proxygen_core::ApplicationApiDescriptionModel;

const FIXTURE: &str = include_str!("fixtures/model.json");

fn fixture_model() -> ApplicationApiDescriptionModel {
    ApplicationApiDescriptionModel::from_json(FIXTURE).unwrap()
}

fn generate(options: GeneratorOptions) -> GeneratedCode {
    let generator = ProxyGenerator::new(options).unwrap();
    generator.generate(&fixture_model()).unwrap()
}

fn content<'a>(code: &'a GeneratedCode, path: &str) -> &'a str {
    code.find(path)
        .unwrap_or_else(|| panic!("missing generated file {path}"))
        .content()
}

#[test]
fn test_full_generation_file_set() {
    let code = generate(GeneratorOptions::default());
    let paths: Vec<_> = code.files().map(GeneratedFile::path).collect();

    assert_eq!(
        paths,
        vec![
            "Acme/BookStore/Books/BookClientProxy.cs",
            "Acme/BookStore/Books/BookClientProxy.Generated.cs",
            "Acme/BookStore/Books/IBookAppService.cs",
            "Acme/BookStore/Stocks/StockClientProxy.cs",
            "Acme/BookStore/Stocks/StockClientProxy.Generated.cs",
            "Acme/BookStore/Stocks/IStockIntegrationService.cs",
            "Acme/BookStore/Books/BookDto.cs",
            "Acme/BookStore/Books/BookType.cs",
            "Acme/BookStore/Books/CreateUpdateBookDto.cs",
        ]
    );
}

#[test]
fn test_only_user_slot_is_create_once() {
    let code = generate(GeneratorOptions::default());
    for file in code.files() {
        let expected = if file.path.ends_with("ClientProxy.cs") {
            WritePolicy::CreateOnce
        } else {
            WritePolicy::Overwrite
        };
        assert_eq!(file.policy, expected, "{}", file.path);
    }
    assert_eq!(code.count_of(FileKind::ClassStub), 2);
}

#[test]
fn test_non_service_controller_excluded() {
    let code = generate(GeneratorOptions::default());
    assert!(code.files().all(|file| !file.path.contains("Health")));
    assert!(code.files().all(|file| !file.content.contains("Health")));
}

#[test]
fn test_book_proxy_class() {
    let code = generate(GeneratorOptions::default());
    let class = content(&code, "Acme/BookStore/Books/BookClientProxy.Generated.cs");

    assert!(class.starts_with(
        concat!(
            "// This file is automatically generated by ABP framework to use MVC Controllers from CSharp\n",
            "using Acme.BookStore.Books;\n",
            "using System;\n",
            "using System.Collections.Generic;\n",
            "using System.Threading.Tasks;\n",
            "using Volo.Abp;\n",
            "using Volo.Abp.Application.Dtos;\n",
            "using Volo.Abp.DependencyInjection;\n",
            "using Volo.Abp.Http.Client;\n",
            "using Volo.Abp.Http.Client.ClientProxying;\n",
            "using Volo.Abp.Http.Modeling;\n",
            "\n",
            "// ReSharper disable once CheckNamespace\n",
            "namespace Acme.BookStore.Books;\n",
            "\n",
            "[Dependency(ReplaceServices = true)]\n",
            "[ExposeServices(typeof(IBookAppService), typeof(BookClientProxy))]\n",
            "public partial class BookClientProxy : ClientProxyBase<IBookAppService>, IBookAppService\n",
            "{\n",
        )
    ));

    assert!(class.contains(
        concat!(
            "    public virtual int Count()\n",
            "    {\n",
            "        //Client Proxy does not support the synchronization method, you should always use asynchronous methods as a best practice\n",
            "        throw new System.NotImplementedException();\n",
            "    }\n",
        )
    ));
    assert!(class.contains(
        concat!(
            "    public virtual async Task DeleteAsync(Guid id)\n",
            "    {\n",
            "        await RequestAsync(nameof(DeleteAsync), new ClientProxyRequestTypeValue\n",
            "        {\n",
            "            { typeof(Guid), id }\n",
            "        });\n",
            "    }\n",
        )
    ));
    assert!(class.contains(
        concat!(
            "    public virtual async Task<PagedResultDto<BookDto>> GetListAsync(PagedAndSortedResultRequestDto input)\n",
            "    {\n",
            "        return await RequestAsync<PagedResultDto<BookDto>>(nameof(GetListAsync), new ClientProxyRequestTypeValue\n",
            "        {\n",
            "            { typeof(PagedAndSortedResultRequestDto), input }\n",
            "        });\n",
            "    }\n}\n",
        )
    ));
    assert!(!class.contains("Ping"));
    assert!(!class.contains("[IntegrationService]"));
}

#[test]
fn test_book_interface() {
    let code = generate(GeneratorOptions::default());
    let interface = content(&code, "Acme/BookStore/Books/IBookAppService.cs");

    assert!(interface.contains("using Volo.Abp.Application.Services;\n"));
    assert!(interface.contains("public interface IBookAppService : IApplicationService\n{\n"));
    assert!(interface.contains("    Task<BookDto> GetAsync(Guid id);\n\n"));
    assert!(interface.contains("    Task DeleteAsync(Guid id);\n\n"));
    assert!(interface.ends_with("    public int Count();\n}\n"));
}

#[test]
fn test_integration_service_controller() {
    let code = generate(GeneratorOptions::default());
    let class = content(&code, "Acme/BookStore/Stocks/StockClientProxy.Generated.cs");

    assert!(class.contains("[IntegrationService]\npublic partial class StockClientProxy"));
    assert!(class.contains(
        "public virtual async Task<Dictionary<Guid,int>> GetLevelsAsync(Guid[] bookIds)"
    ));
    assert!(class.contains("{ typeof(Guid[]), bookIds }"));

    let interface = content(&code, "Acme/BookStore/Stocks/IStockIntegrationService.cs");
    assert!(interface.contains("    Task<Dictionary<Guid,int>> GetLevelsAsync(Guid[] bookIds);\n"));
}

#[test]
fn test_dto_files() {
    let code = generate(GeneratorOptions::default());

    let book = content(&code, "Acme/BookStore/Books/BookDto.cs");
    assert!(book.contains("public class BookDto : AuditedEntityDto<Guid>\n"));
    assert!(book.contains("    public DateTime PublishDate { get; set; }\n"));
    assert!(book.contains("using Volo.Abp.ObjectExtending;\n"));

    let book_type = content(&code, "Acme/BookStore/Books/BookType.cs");
    assert!(book_type.contains(
        "public enum BookType\n{\n    Undefined = 0,\n    Adventure = 1,\n    Biography = 2,\n    Fantastic = 3\n}\n"
    ));
}

#[test]
fn test_without_contracts_emits_classes_only() {
    let code = generate(GeneratorOptions {
        layout: OutputLayout::Namespaced,
        with_contracts: false,
    });

    assert_eq!(code.file_count(), 4);
    assert_eq!(code.count_of(FileKind::ServiceInterface), 0);
    assert_eq!(code.count_of(FileKind::Dto), 0);
}

#[test]
fn test_flat_layout() {
    let code = generate(GeneratorOptions {
        layout: OutputLayout::Flat,
        with_contracts: true,
    });

    assert!(code.files().all(|file| !file.path.contains('/')));
    assert!(code.find("BookClientProxy.Generated.cs").is_some());
    assert!(code.find("BookDto.cs").is_some());
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate(GeneratorOptions::default());
    let second = generate(GeneratorOptions::default());
    assert_eq!(first.files, second.files);
}
